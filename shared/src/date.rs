//! 日期与金额的展示工具
//!
//! - 后端日期统一为 `YYYY-MM-DD`（或以其开头的 ISO 8601 时间戳）
//! - 界面显示使用 `dd/mm/yyyy` 与 `R$ 1.234,56`

use chrono::{Local, NaiveDate};

pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// 本地时区的今天
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 今天的线上格式字符串
pub fn today_wire() -> String {
    today().format(WIRE_DATE_FORMAT).to_string()
}

/// 解析 `YYYY-MM-DD`，也接受 `2024-05-01T10:00:00Z` / `2024-05-01 10:00:00` 这类前缀形式
pub fn parse_wire_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10)?;
    if s.len() > 10 && !matches!(s.as_bytes()[10], b'T' | b' ') {
        return None;
    }
    NaiveDate::parse_from_str(head, WIRE_DATE_FORMAT).ok()
}

/// 线上日期 -> 显示日期；无法解析时原样返回
pub fn display_date(s: &str) -> String {
    parse_wire_date(s)
        .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| s.to_string())
}

/// 金额显示为巴西雷亚尔格式
pub fn format_brl(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let int_part = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!(
        "{}R$ {},{:02}",
        if negative { "-" } else { "" },
        grouped,
        frac
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_prefixed_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(parse_wire_date("2024-05-01"), expected);
        assert_eq!(parse_wire_date("2024-05-01T10:00:00.000000Z"), expected);
        assert_eq!(parse_wire_date("2024-05-01 10:00:00"), expected);
        assert_eq!(parse_wire_date("2024-05-0100"), None);
        assert_eq!(parse_wire_date("01/05/2024"), None);
        assert_eq!(parse_wire_date("2024-5-1"), None);
    }

    #[test]
    fn display_falls_back_to_raw() {
        assert_eq!(display_date("2024-12-31"), "31/12/2024");
        assert_eq!(display_date("ontem"), "ontem");
    }

    #[test]
    fn brl_formatting() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(8.5), "R$ 8,50");
        assert_eq!(format_brl(1234.567), "R$ 1.234,57");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-42.1), "-R$ 42,10");
    }
}
