//! Summary cards for the current month's income, expenses, balance and
//! transaction count.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    aggregation::{MonthlySummary, Period},
    html::{CARD_STYLE, EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE, format_currency, format_month_year},
};

/// Renders the four summary cards for `summary`, labelled with `period`.
pub(super) fn summary_cards_view(summary: &MonthlySummary, period: Period) -> Markup {
    let month_label = format_month_year(period.year, period.month);
    let balance_style = if summary.balance < Decimal::ZERO {
        EXPENSE_TEXT_STYLE
    } else {
        INCOME_TEXT_STYLE
    };

    html! {
        section
            id="summary-cards"
            class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 w-full"
        {
            (summary_card(
                "Receitas",
                &format_currency(summary.total_income),
                INCOME_TEXT_STYLE,
                &month_label,
            ))
            (summary_card(
                "Despesas",
                &format_currency(summary.total_expenses),
                EXPENSE_TEXT_STYLE,
                &month_label,
            ))
            (summary_card(
                "Saldo",
                &format_currency(summary.balance),
                balance_style,
                &month_label,
            ))
            (summary_card(
                "Transações",
                &summary.transaction_count.to_string(),
                "",
                "Este mês",
            ))
        }
    }
}

fn summary_card(title: &str, value: &str, value_style: &str, caption: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) aria-label=(title)
        {
            h3 class="text-sm font-medium" { (title) }
            p class={ "text-2xl font-bold " (value_style) } { (value) }
            p class="text-xs text-gray-500 dark:text-gray-400" { (caption) }
        }
    }
}
