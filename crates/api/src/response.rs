//! Shared response envelope types for API handlers.
//!
//! All API responses carry a `success` flag. Mutations add a human-readable
//! `message`; list endpoints wrap their rows in `data`, with paginated lists
//! adding `meta` and `links`. Use these structs instead of ad-hoc
//! `serde_json::json!` blocks to get compile-time type safety and consistent
//! serialization.

use serde::Serialize;
use sitebook_core::pagination::{PageLinks, PageMeta};

/// Standard `{ "success": true, "data": T }` envelope for reads.
#[derive(Debug, Serialize)]
pub struct ItemResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ItemResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "success": true, "message": ..., "data": T }` envelope for mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> MessageResponse<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// `{ "success": true, "message": ... }` envelope for deletions.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub success: bool,
    pub message: &'static str,
}

impl StatusMessage {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Paginated list envelope with Laravel-style `meta` and `links` blocks.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub meta: PageMeta,
    pub links: PageLinks,
}

impl<T: Serialize> PagedResponse<T> {
    pub fn new(data: Vec<T>, meta: PageMeta, links: PageLinks) -> Self {
        Self {
            success: true,
            data,
            meta,
            links,
        }
    }
}
