//! Form overlays for the create/edit flows.
//!
//! A form is a flat list of text fields with one active at a time.
//! Submission parses every field and either yields a single worker
//! command or a field-level error that keeps the overlay open —
//! nothing is sent until the whole form parses.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use tradedesk_core::api::{BacktestRequest, NewStrategy, NewTrade, ScreenRequest, TradePatch};
use tradedesk_core::domain::{CriterionValue, ParamValue, ScreenResult, Strategy, Trade};

use crate::worker::WorkerCommand;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub required: bool,
    pub error: Option<String>,
}

impl FormField {
    fn required(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            value: String::new(),
            required: true,
            error: None,
        }
    }

    fn optional(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            value: String::new(),
            required: false,
            error: None,
        }
    }

    fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// What a submitted form turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum FormKind {
    NewTrade,
    EditTrade {
        id: i64,
    },
    NewScreen,
    NewStrategy,
    Backtest {
        strategy_id: i64,
        params: BTreeMap<String, ParamValue>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub active: usize,
}

impl FormState {
    pub fn new_trade() -> Self {
        Self {
            kind: FormKind::NewTrade,
            title: "New trade".into(),
            fields: vec![
                FormField::required("Ticker", "symbol, e.g. AAPL"),
                FormField::required("Entry date", "YYYY-MM-DD"),
                FormField::required("Entry price", "per share"),
                FormField::required("Position size", "shares"),
                FormField::required("Setup", "e.g. Breakout"),
                FormField::optional("Exit date", "YYYY-MM-DD, empty if open"),
                FormField::optional("Exit price", "empty if open"),
                FormField::optional("Notes", ""),
            ],
            active: 0,
        }
    }

    pub fn edit_trade(trade: &Trade) -> Self {
        let date = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
        };
        let num = |n: Option<f64>| n.map(|n| n.to_string()).unwrap_or_default();
        Self {
            kind: FormKind::EditTrade { id: trade.id },
            title: format!("Edit trade {}", trade.ticker),
            fields: vec![
                FormField::optional("Exit date", "YYYY-MM-DD").with_value(date(trade.exit_date)),
                FormField::optional("Exit price", "closes the position")
                    .with_value(num(trade.exit_price)),
                FormField::optional("Notes", "").with_value(trade.notes.clone().unwrap_or_default()),
                FormField::optional("Still open", "true/false, empty to keep"),
            ],
            active: 0,
        }
    }

    /// Fresh screening form, optionally prefilled from a previous run
    /// (the "repeat" action).
    pub fn new_screen(prefill: Option<&ScreenResult>) -> Self {
        let (title, criteria, tickers) = match prefill {
            Some(screen) => (
                format!("Repeat screening #{}", screen.id),
                format_kv(&screen.filter_criteria),
                screen.results.tickers.join(", "),
            ),
            None => ("New screening".into(), String::new(), String::new()),
        };
        Self {
            kind: FormKind::NewScreen,
            title,
            fields: vec![
                FormField::required("Criteria", "key=value, comma-separated")
                    .with_value(criteria),
                FormField::required("Tickers", "comma-separated").with_value(tickers),
                FormField::optional("As of date", "YYYY-MM-DD, empty = today"),
            ],
            active: 0,
        }
    }

    pub fn new_strategy() -> Self {
        Self {
            kind: FormKind::NewStrategy,
            title: "New strategy".into(),
            fields: vec![
                FormField::required("Name", "unique"),
                FormField::required("Description", ""),
                FormField::optional("Parameters", "key=value, comma-separated"),
            ],
            active: 0,
        }
    }

    pub fn backtest(strategy: &Strategy) -> Self {
        Self {
            kind: FormKind::Backtest {
                strategy_id: strategy.id,
                params: strategy.parameters.clone(),
            },
            title: format!("Backtest '{}'", strategy.name),
            fields: vec![
                FormField::required("Tickers", "comma-separated"),
                FormField::required("Start date", "YYYY-MM-DD"),
                FormField::required("End date", "YYYY-MM-DD"),
            ],
            active: 0,
        }
    }

    pub fn next_field(&mut self) {
        if self.active + 1 < self.fields.len() {
            self.active += 1;
        }
    }

    pub fn prev_field(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn insert_char(&mut self, c: char) {
        let field = &mut self.fields[self.active];
        field.value.push(c);
        field.error = None;
    }

    pub fn backspace(&mut self) {
        let field = &mut self.fields[self.active];
        field.value.pop();
        field.error = None;
    }

    fn value(&self, index: usize) -> &str {
        self.fields[index].value.trim()
    }
}

/// A parse problem anchored to the field it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: usize,
    pub message: String,
}

impl FieldError {
    fn new(field: usize, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Turn a filled form into the one command it submits.
pub fn build_command(form: &FormState) -> Result<WorkerCommand, FieldError> {
    match &form.kind {
        FormKind::NewTrade => build_new_trade(form),
        FormKind::EditTrade { id } => build_edit_trade(form, *id),
        FormKind::NewScreen => build_new_screen(form),
        FormKind::NewStrategy => build_new_strategy(form),
        FormKind::Backtest {
            strategy_id,
            params,
        } => build_backtest(form, *strategy_id, params),
    }
}

fn build_new_trade(form: &FormState) -> Result<WorkerCommand, FieldError> {
    let ticker = required_text(form, 0)?.to_uppercase();
    let entry_date = parse_date(form.value(1)).map_err(|m| FieldError::new(1, m))?;
    let entry_price = parse_f64(form.value(2)).map_err(|m| FieldError::new(2, m))?;
    let position_size = parse_f64(form.value(3)).map_err(|m| FieldError::new(3, m))?;
    let setup_type = required_text(form, 4)?.to_string();
    let exit_date = parse_opt_date(form.value(5)).map_err(|m| FieldError::new(5, m))?;
    let exit_price = parse_opt_f64(form.value(6)).map_err(|m| FieldError::new(6, m))?;
    let notes = opt_text(form.value(7));

    // A trade with exit data is born closed; the backend enforces the
    // same rule.
    let is_open = exit_date.is_none() && exit_price.is_none();

    Ok(WorkerCommand::CreateTrade(NewTrade {
        ticker,
        entry_date,
        exit_date,
        entry_price,
        exit_price,
        position_size,
        setup_type,
        notes,
        strategy_id: None,
        is_open,
    }))
}

fn build_edit_trade(form: &FormState, id: i64) -> Result<WorkerCommand, FieldError> {
    let patch = TradePatch {
        exit_date: parse_opt_date(form.value(0)).map_err(|m| FieldError::new(0, m))?,
        exit_price: parse_opt_f64(form.value(1)).map_err(|m| FieldError::new(1, m))?,
        notes: opt_text(form.value(2)),
        is_open: parse_opt_bool(form.value(3)).map_err(|m| FieldError::new(3, m))?,
    };
    if patch == TradePatch::default() {
        return Err(FieldError::new(0, "nothing to change"));
    }
    Ok(WorkerCommand::UpdateTrade { id, patch })
}

fn build_new_screen(form: &FormState) -> Result<WorkerCommand, FieldError> {
    let criteria = parse_kv(form.value(0)).map_err(|m| FieldError::new(0, m))?;
    if criteria.is_empty() {
        return Err(FieldError::new(0, "at least one criterion required"));
    }
    let tickers = parse_tickers(form.value(1)).map_err(|m| FieldError::new(1, m))?;
    let as_of_date = parse_opt_date(form.value(2)).map_err(|m| FieldError::new(2, m))?;

    Ok(WorkerCommand::RunScreen(ScreenRequest {
        criteria,
        tickers,
        as_of_date,
        save_results: true,
    }))
}

fn build_new_strategy(form: &FormState) -> Result<WorkerCommand, FieldError> {
    let name = required_text(form, 0)?.to_string();
    let description = required_text(form, 1)?.to_string();
    let parameters = parse_kv(form.value(2)).map_err(|m| FieldError::new(2, m))?;

    Ok(WorkerCommand::CreateStrategy(NewStrategy {
        name,
        description,
        parameters,
    }))
}

fn build_backtest(
    form: &FormState,
    strategy_id: i64,
    params: &BTreeMap<String, ParamValue>,
) -> Result<WorkerCommand, FieldError> {
    let tickers = parse_tickers(form.value(0)).map_err(|m| FieldError::new(0, m))?;
    let start_date = parse_date(form.value(1)).map_err(|m| FieldError::new(1, m))?;
    let end_date = parse_date(form.value(2)).map_err(|m| FieldError::new(2, m))?;
    if end_date <= start_date {
        return Err(FieldError::new(2, "end date must be after the start date"));
    }

    Ok(WorkerCommand::RunBacktest(BacktestRequest {
        tickers,
        strategy_id: Some(strategy_id),
        strategy_params: params.clone(),
        start_date,
        end_date,
        save_results: true,
    }))
}

fn required_text(form: &FormState, index: usize) -> Result<&str, FieldError> {
    let value = form.value(index);
    if value.is_empty() {
        Err(FieldError::new(index, "required"))
    } else {
        Ok(value)
    }
}

fn opt_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("expected YYYY-MM-DD, got '{value}'"))
}

fn parse_opt_date(value: &str) -> Result<Option<NaiveDate>, String> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse_date(value).map(Some)
    }
}

fn parse_f64(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("expected a number, got '{value}'"))
}

fn parse_opt_f64(value: &str) -> Result<Option<f64>, String> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse_f64(value).map(Some)
    }
}

fn parse_opt_bool(value: &str) -> Result<Option<bool>, String> {
    match value.to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "yes" => Ok(Some(true)),
        "false" | "no" => Ok(Some(false)),
        other => Err(format!("expected true/false, got '{other}'")),
    }
}

/// `key=value, key=value` into a criteria/parameter map. Values are
/// typed the way the backend stores them: bool, number, or text.
fn parse_kv(value: &str) -> Result<BTreeMap<String, CriterionValue>, String> {
    let mut map = BTreeMap::new();
    for pair in value.split([',', '\n']) {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{pair}'"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("missing key in '{pair}'"));
        }
        map.insert(key.to_string(), scalar_value(raw.trim()));
    }
    Ok(map)
}

fn scalar_value(raw: &str) -> CriterionValue {
    match raw.to_ascii_lowercase().as_str() {
        "true" => return CriterionValue::Bool(true),
        "false" => return CriterionValue::Bool(false),
        _ => {}
    }
    if let Ok(n) = raw.parse::<f64>() {
        return CriterionValue::Number(n);
    }
    CriterionValue::Text(raw.to_string())
}

fn parse_tickers(value: &str) -> Result<Vec<String>, String> {
    let tickers: Vec<String> = value
        .split([',', ' '])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .collect();
    if tickers.is_empty() {
        return Err("at least one ticker required".into());
    }
    Ok(tickers)
}

/// Inverse of `parse_kv`, used to prefill the repeat-screening form.
/// Emits the editable spelling (`true`, not the display "Yes") so the
/// prefilled text parses back into the same criteria.
fn format_kv(map: &BTreeMap<String, CriterionValue>) -> String {
    map.iter()
        .map(|(k, v)| match v {
            CriterionValue::Bool(b) => format!("{k}={b}"),
            other => format!("{k}={other}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut FormState, values: &[&str]) {
        for (field, value) in form.fields.iter_mut().zip(values) {
            field.value = (*value).to_string();
        }
    }

    #[test]
    fn new_trade_without_exit_is_open() {
        let mut form = FormState::new_trade();
        fill(
            &mut form,
            &["aapl", "2024-01-05", "180.0", "20", "Breakout", "", "", ""],
        );
        match build_command(&form).unwrap() {
            WorkerCommand::CreateTrade(trade) => {
                assert_eq!(trade.ticker, "AAPL");
                assert!(trade.is_open);
                assert!(trade.exit_price.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn new_trade_with_exit_price_is_closed() {
        let mut form = FormState::new_trade();
        fill(
            &mut form,
            &["NVDA", "2024-01-05", "500", "4", "Gap", "", "540.5", "took profit"],
        );
        match build_command(&form).unwrap() {
            WorkerCommand::CreateTrade(trade) => {
                assert!(!trade.is_open);
                assert_eq!(trade.exit_price, Some(540.5));
                assert_eq!(trade.notes.as_deref(), Some("took profit"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_anchored_to_its_field() {
        let mut form = FormState::new_trade();
        fill(
            &mut form,
            &["AAPL", "05.01.2024", "180", "20", "Breakout", "", "", ""],
        );
        let err = build_command(&form).unwrap_err();
        assert_eq!(err.field, 1);
        assert!(err.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn empty_edit_is_rejected() {
        let trade = sample_trade();
        let mut form = FormState::edit_trade(&trade);
        for field in &mut form.fields {
            field.value.clear();
        }
        let err = build_command(&form).unwrap_err();
        assert!(err.message.contains("nothing"));
    }

    #[test]
    fn edit_builds_partial_patch() {
        let trade = sample_trade();
        let mut form = FormState::edit_trade(&trade);
        for field in &mut form.fields {
            field.value.clear();
        }
        form.fields[1].value = "210.5".into();
        match build_command(&form).unwrap() {
            WorkerCommand::UpdateTrade { id, patch } => {
                assert_eq!(id, trade.id);
                assert_eq!(patch.exit_price, Some(210.5));
                assert!(patch.exit_date.is_none());
                assert!(patch.notes.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn kv_parsing_types_values() {
        let map = parse_kv("min_volume=500000, above_sma200=true, sector=Tech").unwrap();
        assert_eq!(map["min_volume"], CriterionValue::Number(500000.0));
        assert_eq!(map["above_sma200"], CriterionValue::Bool(true));
        assert_eq!(map["sector"], CriterionValue::Text("Tech".into()));

        assert!(parse_kv("no-equals-sign").is_err());
    }

    #[test]
    fn screen_form_requires_criteria_and_tickers() {
        let mut form = FormState::new_screen(None);
        fill(&mut form, &["", "AAPL", ""]);
        assert_eq!(build_command(&form).unwrap_err().field, 0);

        fill(&mut form, &["above_sma200=true", "", ""]);
        assert_eq!(build_command(&form).unwrap_err().field, 1);
    }

    #[test]
    fn repeat_screening_prefills_from_the_run() {
        let screen: ScreenResult = serde_json::from_str(
            r#"{
                "id": 3,
                "date": "2024-05-02",
                "filter_criteria": {"above_sma200": true, "min_volume": 500000},
                "results": {"tickers": ["AAPL", "NVDA"]},
                "created_at": "2024-05-02 09:31:00"
            }"#,
        )
        .unwrap();
        let form = FormState::new_screen(Some(&screen));
        assert!(form.title.contains("#3"));
        assert_eq!(form.fields[0].value, "above_sma200=true, min_volume=500000");
        assert_eq!(form.fields[1].value, "AAPL, NVDA");
        // The round trip must parse back into the same criteria.
        let parsed = parse_kv(&form.fields[0].value).unwrap();
        assert_eq!(parsed["above_sma200"], CriterionValue::Bool(true));
        assert_eq!(parsed["min_volume"], CriterionValue::Number(500000.0));
    }

    #[test]
    fn backtest_rejects_inverted_date_range() {
        let strategy: Strategy = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Momentum",
                "description": "",
                "parameters": {"lookback": 90},
                "created_at": "2024-01-10 08:00:00"
            }"#,
        )
        .unwrap();
        let mut form = FormState::backtest(&strategy);
        fill(&mut form, &["SPY", "2024-06-01", "2024-01-01"]);
        let err = build_command(&form).unwrap_err();
        assert_eq!(err.field, 2);

        fill(&mut form, &["SPY", "2023-01-01", "2024-01-01"]);
        match build_command(&form).unwrap() {
            WorkerCommand::RunBacktest(request) => {
                assert_eq!(request.strategy_id, Some(1));
                assert_eq!(request.strategy_params.len(), 1);
                assert_eq!(request.tickers, vec!["SPY".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn editing_clears_the_field_error() {
        let mut form = FormState::new_trade();
        form.fields[0].error = Some("required".into());
        form.insert_char('A');
        assert!(form.fields[0].error.is_none());
        form.backspace();
        assert!(form.fields[0].value.is_empty());
    }

    fn sample_trade() -> Trade {
        serde_json::from_str(
            r#"{
                "id": 11,
                "ticker": "AAPL",
                "entry_date": "2024-01-05",
                "entry_price": 180.0,
                "position_size": 20.0,
                "setup_type": "Breakout",
                "is_open": true
            }"#,
        )
        .unwrap()
    }
}
