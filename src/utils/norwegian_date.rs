// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;

/// 解析挪威语短日期，例如 `12. mai. 1998`
///
/// 月份使用三个字母的挪威语缩写（jan..des），无法识别时返回 `None`
pub fn parse_norwegian_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].trim().parse().ok()?;
    let month = month_number(&parts[1].trim().to_lowercase())?;
    let year: i32 = parts[2].trim().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(month: &str) -> Option<u32> {
    let number = match month {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "mai" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "okt" => 10,
        "nov" => 11,
        "des" => 12,
        _ => return None,
    };
    Some(number)
}
