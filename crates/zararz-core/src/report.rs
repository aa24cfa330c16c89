//! Human-readable price reports.
//!
//! A report is the category header, one `- {name}: {price} ` line per entry
//! and an optional footer. Markup is Telegram-flavoured HTML.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::category::{Category, CategoryProfile};
use crate::jalali::{Clock, JalaliStamp};
use crate::observer::PipelineObserver;
use crate::price::{PriceMap, PriceValue};

/// Header block for a category at the given time.
pub fn header(profile: &CategoryProfile, stamp: &JalaliStamp) -> String {
    format!(
        "\n{}\n\nتاریخ: {}\nساعت: {}\n\n",
        profile.title, stamp.date, stamp.time
    )
}

/// Renders a full report, calling `on_unparsed` for every price that fell
/// back to its textual form.
pub fn render_report<F>(
    profile: &CategoryProfile,
    stamp: &JalaliStamp,
    prices: &PriceMap,
    mut on_unparsed: F,
) -> String
where
    F: FnMut(&str, &PriceValue),
{
    let mut text = header(profile, stamp);

    for (name, price) in prices.iter() {
        if profile.is_excluded(name) {
            continue;
        }
        if profile.breaks_before(name) {
            text.push('\n');
        }

        let label = profile.display_name(name);
        let rendered = price.render(profile.price_style);
        if rendered.is_fallback() {
            on_unparsed(label, price);
        }
        let _ = writeln!(text, "- {label}: {} ", rendered.as_str());
    }

    if let Some(footer) = profile.footer {
        text.push_str(footer);
    }
    text
}

/// Formats category reports stamped with the injected clock.
#[derive(Clone)]
pub struct ReportFormatter {
    clock: Arc<dyn Clock>,
    observer: Arc<dyn PipelineObserver>,
}

impl ReportFormatter {
    pub fn new(clock: Arc<dyn Clock>, observer: Arc<dyn PipelineObserver>) -> Self {
        Self { clock, observer }
    }

    pub fn format(&self, category: Category, prices: &PriceMap) -> String {
        let stamp = JalaliStamp::at(self.clock.now());
        render_report(category.profile(), &stamp, prices, |name, value| {
            self.observer.price_unparsed(category, name, value)
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn stamp() -> JalaliStamp {
        JalaliStamp {
            date: String::from("1403/05/10"),
            time: String::from("14:30"),
        }
    }

    fn prices(entries: &[(&str, serde_json::Value)]) -> PriceMap {
        let mut map = PriceMap::new();
        for (name, value) in entries {
            map.insert(*name, PriceValue::from_json(value.clone()).expect("non-null"));
        }
        map
    }

    #[test]
    fn gold_header_and_lines() {
        let map = prices(&[("طلای ۱۸ عیار", json!(7_150_000))]);
        let text = render_report(Category::Gold.profile(), &stamp(), &map, |_, _| {});

        assert_eq!(
            text,
            "\n<b>\u{1F7E1} قیمت طلا و سکه</b>\n\nتاریخ: 1403/05/10\nساعت: 14:30\n\n- طلای ۱۸ عیار: 7,150,000 \n"
        );
    }

    #[test]
    fn currency_footer_follows_entries() {
        let map = prices(&[("دلار", json!(60_000))]);
        let text = render_report(Category::Currency.profile(), &stamp(), &map, |_, _| {});

        assert!(text.ends_with("- دلار: 60,000 \n\n (<b>قیمت‌ها به تومان است</b>)"));
    }

    #[test]
    fn unparsed_prices_are_reported_with_display_name() {
        let map = prices(&[("دلار تتر", json!("N/A"))]);
        let mut seen = Vec::new();
        let text = render_report(Category::Currency.profile(), &stamp(), &map, |name, value| {
            seen.push((name.to_owned(), value.clone()))
        });

        assert!(text.contains("- تتر: N/A \n"));
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "تتر");
    }
}
