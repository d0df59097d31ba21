//! Server-rendered calculator page.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::application::presenter::{
    BreakdownContext, DisplayMessage, DisplayTone, format_fixed, present_rate, present_rejection,
    present_result, present_warning,
};
use crate::application::use_cases::{CalculationOutcome, CalculationRequestError, SizingOutcome};
use crate::domain::instrument::{ConversionMode, Instrument, InstrumentCatalog};
use crate::domain::quote::RateQuote;

use super::request::ACTION_CALCULATE;

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.75rem}input,select{width:100%;padding:.3rem}\
.row{display:flex;gap:1rem}.row>div{flex:1}\
.msg{padding:.5rem .75rem;border-radius:4px;margin:.75rem 0}\
.success{background:#e6f4ea}.info{background:#e8f0fe}.warning{background:#fef7e0}.error{background:#fce8e6}\
.metrics{display:flex;gap:1rem}.metric{flex:1;border:1px solid #ddd;border-radius:4px;padding:.5rem}\
.metric b{display:block;font-size:1.3rem}button{margin-top:1rem;padding:.4rem 1rem}";

/// Everything the page shows after one request.
#[derive(Debug)]
pub struct CalculatorPage<'a> {
    /// Selected instrument.
    pub instrument: &'static Instrument,
    /// Selected contract spec label.
    pub spec_label: &'static str,
    /// Point value field (Custom only).
    pub custom_point_value: Decimal,
    /// Risk budget field.
    pub max_risk: Decimal,
    /// Manual rate field (manual conversion only).
    pub manual_rate: Decimal,
    /// Entry price field.
    pub entry: Decimal,
    /// Stop-loss field.
    pub stop: Decimal,
    /// Rate fetched for this render.
    pub rate: &'a RateQuote,
    /// Calculation, when one was requested.
    pub calculation: Option<&'a Result<CalculationOutcome, CalculationRequestError>>,
}

impl CalculatorPage<'_> {
    /// Render the full HTML document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(8 * 1024);
        let _ = write!(
            html,
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>Index CFD Position Sizer</title><style>{STYLE}</style></head><body>\
             <h1>Index CFD Position Sizer</h1>\
             <form method=\"get\" action=\"/\">\
             <input type=\"hidden\" name=\"loaded_instrument\" value=\"{}\">",
            escape_html(self.instrument.id.code())
        );

        self.render_instrument_fields(&mut html);
        self.render_rate_fields(&mut html);
        self.render_price_fields(&mut html);

        let _ = write!(
            html,
            "<button type=\"submit\" name=\"action\" value=\"{ACTION_CALCULATE}\">Calculate position size</button> \
             <button type=\"submit\" name=\"action\" value=\"refresh\">Refresh rate</button></form>"
        );

        if let Some(calculation) = self.calculation {
            render_calculation(&mut html, calculation);
        }

        html.push_str("</body></html>");
        html
    }

    fn render_instrument_fields(&self, html: &mut String) {
        html.push_str(
            "<label for=\"instrument\">Instrument</label>\
             <select id=\"instrument\" name=\"instrument\" onchange=\"this.form.submit()\">",
        );
        for instrument in InstrumentCatalog::all() {
            let selected = if instrument.id == self.instrument.id {
                " selected"
            } else {
                ""
            };
            let _ = write!(
                html,
                "<option value=\"{}\"{selected}>{}</option>",
                escape_html(instrument.id.code()),
                escape_html(instrument.name())
            );
        }
        html.push_str("</select>");

        if self.instrument.is_custom() {
            let _ = write!(
                html,
                "<label for=\"custom_point_value\">Point value (quote currency per point)</label>\
                 <input id=\"custom_point_value\" name=\"custom_point_value\" type=\"number\" \
                 min=\"0.01\" step=\"any\" value=\"{}\">",
                input_value(self.custom_point_value)
            );
        } else {
            html.push_str(
                "<label for=\"spec\">Contract specification</label><select id=\"spec\" name=\"spec\">",
            );
            for spec in self.instrument.contract_specs {
                let selected = if spec.label == self.spec_label {
                    " selected"
                } else {
                    ""
                };
                let _ = write!(
                    html,
                    "<option value=\"{0}\"{selected}>{0}</option>",
                    escape_html(spec.label)
                );
            }
            html.push_str("</select>");
        }

        let _ = write!(
            html,
            "<label for=\"max_risk\">Maximum risk (USD)</label>\
             <input id=\"max_risk\" name=\"max_risk\" type=\"number\" min=\"1\" step=\"any\" value=\"{}\">",
            input_value(self.max_risk)
        );
    }

    fn render_rate_fields(&self, html: &mut String) {
        let currency = self.instrument.currency.code();
        match self.instrument.conversion {
            ConversionMode::ManualEntry => {
                let _ = write!(
                    html,
                    "<label for=\"manual_rate\">Exchange rate to USD</label>\
                     <input id=\"manual_rate\" name=\"manual_rate\" type=\"number\" \
                     min=\"0.0001\" step=\"any\" value=\"{}\">",
                    input_value(self.manual_rate)
                );
            }
            ConversionMode::NoConversion | ConversionMode::FetchedRate { .. } => {
                let display = present_rate(self.rate);
                let _ = write!(html, "<p>{} / USD rate:</p>", escape_html(currency));
                render_message(html, &display);
            }
        }
    }

    fn render_price_fields(&self, html: &mut String) {
        let _ = write!(
            html,
            "<div class=\"row\"><div><label for=\"entry\">Entry price</label>\
             <input id=\"entry\" name=\"entry\" type=\"number\" min=\"0\" step=\"any\" value=\"{}\"></div>\
             <div><label for=\"stop\">Stop-loss price</label>\
             <input id=\"stop\" name=\"stop\" type=\"number\" min=\"0\" step=\"any\" value=\"{}\"></div></div>",
            price_value(self.entry),
            price_value(self.stop)
        );
    }
}

fn render_calculation(
    html: &mut String,
    calculation: &Result<CalculationOutcome, CalculationRequestError>,
) {
    let outcome = match calculation {
        Ok(outcome) => outcome,
        Err(e) => {
            render_message(
                html,
                &DisplayMessage {
                    tone: DisplayTone::Warning,
                    message: e.to_string(),
                },
            );
            return;
        }
    };

    match &outcome.sizing {
        SizingOutcome::Rejected(error) => render_message(html, &present_rejection(error)),
        SizingOutcome::Sized { result, warnings } => {
            let context = BreakdownContext {
                currency: outcome.instrument.currency,
                exchange_rate: outcome.exchange_rate,
                contract_size: outcome.contract_size,
                max_risk: outcome.max_risk,
            };
            let formatted = present_result(result, &context);

            let _ = write!(
                html,
                "<h2>Result</h2><div class=\"metrics\">\
                 <div class=\"metric\">Stop distance<b>{} points</b></div>\
                 <div class=\"metric\">Value per point<b>{}</b></div>\
                 <div class=\"metric\">Risk per lot<b>{}</b></div></div>",
                escape_html(&formatted.stop_distance),
                escape_html(&formatted.value_per_point_usd),
                escape_html(&formatted.risk_per_lot_usd)
            );
            render_message(
                html,
                &DisplayMessage {
                    tone: DisplayTone::Success,
                    message: format!("Recommended position size: {} lots", formatted.lots_headline),
                },
            );
            for warning in warnings {
                render_message(html, &present_warning(warning));
            }

            html.push_str("<details open><summary>Calculation breakdown</summary><ol>");
            for line in &formatted.breakdown {
                let _ = write!(html, "<li>{}</li>", escape_html(line));
            }
            html.push_str("</ol></details>");
        }
    }
}

fn render_message(html: &mut String, display: &DisplayMessage) {
    let _ = write!(
        html,
        "<div class=\"msg {}\">{}</div>",
        display.tone.as_str(),
        escape_html(&display.message)
    );
}

/// Decimal as an input value, without trailing zeros.
fn input_value(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Price as an input value, two decimals.
fn price_value(value: Decimal) -> String {
    format_fixed(value, 2)
}

/// Escape text for HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
