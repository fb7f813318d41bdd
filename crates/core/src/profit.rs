//! Profit computation over a project's stored aggregates and sale record.
//!
//! Profit is defined strictly on cash: cash received from the sale minus
//! cash put in (investments plus expenses). The sale's `credit_amount` and
//! the project's nominal `sale_price` are deliberately excluded. Nothing
//! here is ever persisted; callers recompute on every read.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::DbId;

/// One investment's stake in a project, as input to the distribution.
#[derive(Debug, Clone)]
pub struct InvestmentStake {
    pub investor_id: DbId,
    pub investor_name: String,
    pub amount: Decimal,
}

/// One entry of a project's profit distribution.
///
/// Entries are per *investment*, not per investor: an investor with two
/// investments in the same project gets two entries.
#[derive(Debug, Clone, Serialize)]
pub struct ProfitShare {
    pub investor_id: DbId,
    pub investor_name: String,
    pub investment_amount: Decimal,
    pub profit_share: Decimal,
    pub ratio: Decimal,
}

/// Net profit for a project: `cash_received - (total_investment + total_expenses)`.
///
/// `cash_received` is the sale's `cash_amount`, or zero when the project
/// has no sale record yet. The result is negative while a project is
/// unsold or under water.
pub fn calculate_profit(
    total_investment: Decimal,
    total_expenses: Decimal,
    cash_received: Option<Decimal>,
) -> Decimal {
    cash_received.unwrap_or(Decimal::ZERO) - (total_investment + total_expenses)
}

/// Split `profit` across investments proportionally to their amounts.
///
/// Returns an empty distribution when `total_investment` is zero (nothing
/// to divide by). Otherwise each stake gets
/// `ratio = amount / total_investment` and `profit_share = profit * ratio`;
/// ratios sum to 1 and shares sum to `profit`, within Decimal rounding.
pub fn profit_distribution(
    profit: Decimal,
    total_investment: Decimal,
    stakes: &[InvestmentStake],
) -> Vec<ProfitShare> {
    if total_investment.is_zero() {
        return Vec::new();
    }

    stakes
        .iter()
        .map(|stake| {
            let ratio = stake.amount / total_investment;
            ProfitShare {
                investor_id: stake.investor_id,
                investor_name: stake.investor_name.clone(),
                investment_amount: stake.amount,
                profit_share: profit * ratio,
                ratio,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn stake(investor_id: DbId, name: &str, amount: i64) -> InvestmentStake {
        InvestmentStake {
            investor_id,
            investor_name: name.to_string(),
            amount: dec(amount),
        }
    }

    #[test]
    fn profit_is_cash_minus_invested_and_spent() {
        // Worked example: 1500 cash on 1000 invested + 200 spent -> 300.
        let profit = calculate_profit(dec(1000), dec(200), Some(dec(1500)));
        assert_eq!(profit, dec(300));
    }

    #[test]
    fn missing_sale_counts_as_zero_cash() {
        let profit = calculate_profit(dec(1000), dec(200), None);
        assert_eq!(profit, dec(-1200));
    }

    #[test]
    fn credit_amount_never_enters_the_computation() {
        // The signature admits only cash_amount; a sale with any
        // credit_amount produces the same profit.
        let with_credit = calculate_profit(dec(1000), dec(200), Some(dec(1500)));
        let without_credit = calculate_profit(dec(1000), dec(200), Some(dec(1500)));
        assert_eq!(with_credit, without_credit);
    }

    #[test]
    fn distribution_splits_proportionally() {
        let stakes = [stake(1, "Amir", 600), stake(2, "Bilal", 400)];
        let shares = profit_distribution(dec(300), dec(1000), &stakes);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].ratio, Decimal::new(6, 1)); // 0.6
        assert_eq!(shares[1].ratio, Decimal::new(4, 1)); // 0.4
        assert_eq!(shares[0].profit_share, dec(180));
        assert_eq!(shares[1].profit_share, dec(120));
    }

    #[test]
    fn distribution_is_empty_when_nothing_invested() {
        let shares = profit_distribution(dec(300), Decimal::ZERO, &[]);
        assert!(shares.is_empty());

        // Even with stakes present, zero total short-circuits (guards the
        // divide-by-zero rather than trusting the inputs to be consistent).
        let shares = profit_distribution(dec(300), Decimal::ZERO, &[stake(1, "Amir", 100)]);
        assert!(shares.is_empty());
    }

    #[test]
    fn ratios_and_shares_sum_to_whole() {
        let stakes = [
            stake(1, "Amir", 250),
            stake(2, "Bilal", 333),
            stake(1, "Amir", 417),
        ];
        let total: Decimal = stakes.iter().map(|s| s.amount).sum();
        let profit = dec(999);
        let shares = profit_distribution(profit, total, &stakes);

        let ratio_sum: Decimal = shares.iter().map(|s| s.ratio).sum();
        let share_sum: Decimal = shares.iter().map(|s| s.profit_share).sum();

        let tolerance = Decimal::new(1, 9); // 1e-9
        assert!((Decimal::ONE - ratio_sum).abs() < tolerance);
        assert!((profit - share_sum).abs() < tolerance);
    }

    #[test]
    fn same_investor_twice_gets_two_entries() {
        let stakes = [stake(7, "Amir", 600), stake(7, "Amir", 400)];
        let shares = profit_distribution(dec(100), dec(1000), &stakes);
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.investor_id == 7));
    }

    #[test]
    fn negative_profit_distributes_losses() {
        let stakes = [stake(1, "Amir", 600), stake(2, "Bilal", 400)];
        let shares = profit_distribution(dec(-500), dec(1000), &stakes);
        assert_eq!(shares[0].profit_share, dec(-300));
        assert_eq!(shares[1].profit_share, dec(-200));
    }
}
