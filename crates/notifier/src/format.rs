//! Builds the Discord payload for each run outcome.

use rust_decimal::{Decimal, RoundingStrategy};

use dollar_sheets_core::constants::{DISPLAY_DECIMAL_PRECISION, NOTIFIED_INSTRUMENTS};
use dollar_sheets_core::ledger::DailySnapshot;
use dollar_sheets_core::notifications::RunOutcome;
use dollar_sheets_market_data::Instrument;

use crate::types::{
    DiscordMessage, Embed, EmbedField, COLOR_FAILED, COLOR_NO_ROWS, COLOR_SUCCESS,
    COLOR_TIMED_OUT, EMBED_DESCRIPTION_LIMIT,
};

pub const SUCCESS_EMBED_TITLE: &str = "Cotizaciones finales del dia";

pub fn build_message(job_name: &str, outcome: &RunOutcome) -> DiscordMessage {
    match outcome {
        RunOutcome::Success {
            today, yesterday, ..
        } => DiscordMessage {
            content: format!("✅ {} run successfully ✅", job_name),
            embeds: vec![Embed::rich(COLOR_SUCCESS)
                .title(SUCCESS_EMBED_TITLE)
                .fields(
                    NOTIFIED_INSTRUMENTS
                        .iter()
                        .map(|&i| instrument_field(i, today, yesterday))
                        .collect(),
                )],
        },
        RunOutcome::NoRowsToAppend => DiscordMessage {
            content: format!(
                "⚠️ {} run but there was no rows to append ⚠️",
                job_name
            ),
            embeds: vec![Embed::rich(COLOR_NO_ROWS)
                .description("The job did run but there were no rows to append")],
        },
        RunOutcome::TimedOut { budget } => DiscordMessage {
            content: format!(
                "🛑⏳🛑 {} timed out after {}ms 🛑⏳🛑",
                job_name,
                budget.as_millis()
            ),
            embeds: vec![Embed::rich(COLOR_TIMED_OUT)
                .description("The job run but timed out and was stopped")],
        },
        RunOutcome::Failed { message, trace } => DiscordMessage {
            content: format!("🚨 {} failed to run 🚨", job_name),
            embeds: vec![
                Embed::rich(COLOR_FAILED)
                    .title("Message")
                    .description(truncate_chars(message, EMBED_DESCRIPTION_LIMIT)),
                Embed::rich(COLOR_FAILED)
                    .title("Stacktrace")
                    .description(truncate_chars(trace, EMBED_DESCRIPTION_LIMIT)),
            ],
        },
    }
}

/// `$<today> <emoji> <±pct> (<±diff>)` for one instrument.
pub fn instrument_field(
    instrument: Instrument,
    today: &DailySnapshot,
    yesterday: &DailySnapshot,
) -> EmbedField {
    let today_value = *today.values.get(instrument);
    let yesterday_value = *yesterday.values.get(instrument);
    let diff = today_value - yesterday_value;
    let sign = if diff >= Decimal::ZERO { "+" } else { "" };

    let percentage = (today_value * Decimal::ONE_HUNDRED)
        .checked_div(yesterday_value)
        .map(|ratio| format!("{}{}", sign, display(ratio - Decimal::ONE_HUNDRED)))
        .unwrap_or_else(|| "n/a".to_string());

    EmbedField {
        name: instrument.column().to_string(),
        value: format!(
            "${} {} {} ({}{})",
            today_value.normalize(),
            trend_emoji(diff),
            percentage,
            sign,
            display(diff)
        ),
        inline: false,
    }
}

fn trend_emoji(diff: Decimal) -> &'static str {
    if diff.is_zero() {
        "➖"
    } else if diff > Decimal::ZERO {
        "⬆️"
    } else {
        "🔻"
    }
}

fn display(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    format!("{:.*}", DISPLAY_DECIMAL_PRECISION as usize, rounded)
}

/// First `limit` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dollar_sheets_market_data::PerInstrument;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn snapshot(day: u32, oficial: Decimal, blue: Decimal, mep: Decimal, ccl: Decimal) -> DailySnapshot {
        DailySnapshot {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            values: PerInstrument {
                oficial,
                blue,
                mep,
                ccl,
                cripto: dec!(1300),
            },
        }
    }

    #[test]
    fn test_success_message_lists_four_instruments() {
        let today = snapshot(13, dec!(950), dec!(1200), dec!(1175.5), dec!(10));
        let yesterday = snapshot(12, dec!(920), dec!(1200), dec!(1200), dec!(0));
        let message = build_message(
            "dollar-price-to-google-sheets",
            &RunOutcome::Success {
                rows_appended: 3,
                today,
                yesterday,
            },
        );

        assert_eq!(
            message.content,
            "✅ dollar-price-to-google-sheets run successfully ✅"
        );
        let embed = &message.embeds[0];
        assert_eq!(embed.title.as_deref(), Some(SUCCESS_EMBED_TITLE));
        assert_eq!(embed.color, 5763719);

        let fields: Vec<(&str, &str)> = embed
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("Oficial", "$950 ⬆️ +3.26 (+30.00)"),
                ("Blue", "$1200 ➖ +0.00 (+0.00)"),
                ("MEP", "$1175.5 🔻 -2.04 (-24.50)"),
                ("CCL", "$10 ⬆️ n/a (+10.00)"),
            ]
        );
    }

    #[test]
    fn test_no_rows_message() {
        let message = build_message("job", &RunOutcome::NoRowsToAppend);
        assert_eq!(message.content, "⚠️ job run but there was no rows to append ⚠️");
        assert_eq!(message.embeds[0].color, 16562691);
    }

    #[test]
    fn test_timed_out_message_reports_budget() {
        let message = build_message(
            "job",
            &RunOutcome::TimedOut {
                budget: Duration::from_millis(300_000),
            },
        );
        assert_eq!(message.content, "🛑⏳🛑 job timed out after 300000ms 🛑⏳🛑");
        assert_eq!(message.embeds[0].color, 16542467);
    }

    #[test]
    fn test_failed_message_truncates_embeds() {
        let trace = "ñ".repeat(5000);
        let message = build_message(
            "job",
            &RunOutcome::Failed {
                message: "Invalid ledger state: last date is in the future".to_string(),
                trace,
            },
        );

        assert_eq!(message.content, "🚨 job failed to run 🚨");
        assert_eq!(message.embeds.len(), 2);
        assert_eq!(message.embeds[0].title.as_deref(), Some("Message"));
        assert_eq!(message.embeds[1].title.as_deref(), Some("Stacktrace"));
        let description = message.embeds[1].description.as_deref().unwrap();
        assert_eq!(description.chars().count(), 4096);
        assert!(message.embeds.iter().all(|e| e.color == 15548997));
    }

    #[test]
    fn test_payload_shape() {
        let payload = serde_json::to_value(build_message("job", &RunOutcome::NoRowsToAppend)).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "content": "⚠️ job run but there was no rows to append ⚠️",
                "embeds": [{
                    "type": "rich",
                    "description": "The job did run but there were no rows to append",
                    "color": 16562691
                }]
            })
        );
    }
}
