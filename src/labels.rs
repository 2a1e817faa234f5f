//! Localized fixed strings used by the layout.

use chrono::{Datelike, NaiveDate};

use crate::config::Locale;
use crate::tree::MemberKind;

/// Captions, kind labels and section labels for one language.
#[derive(Debug)]
pub struct Labels {
    /// Suffix after a package name.
    pub package: &'static str,
    /// Suffix after a class name.
    pub class: &'static str,
    /// Label of the implemented interfaces section.
    pub interfaces: &'static str,
    /// Label of the `@version` section.
    pub version: &'static str,
    /// Label of the `@author` section.
    pub author: &'static str,
    /// Group title of enum constants.
    pub enum_constant_detail: &'static str,
    /// Group title of fields.
    pub field_detail: &'static str,
    /// Group title of constructors.
    pub constructor_detail: &'static str,
    /// Group title of methods.
    pub method_detail: &'static str,
    /// Kind label of a field.
    pub field: &'static str,
    /// Kind label of an enum constant.
    pub enum_constant: &'static str,
    /// Kind label of a constructor.
    pub constructor: &'static str,
    /// Kind label of a method.
    pub method: &'static str,
    /// Label of the parameters section.
    pub parameters: &'static str,
    /// Label of the return value section.
    pub returns: &'static str,
    /// Label of the exceptions section.
    pub throws: &'static str,
    date_style: DateStyle,
}

/// How the cover page date is written.
#[derive(Clone, Copy, Debug)]
enum DateStyle {
    /// A `chrono` format string over the Gregorian calendar.
    Gregorian(&'static str),
    /// Japanese imperial era, e.g. `令和8年10月19日`; the first year of an era reads `元年`.
    JapaneseEra,
}

/// Eras with their first day, newest first.
const JAPANESE_ERAS: &[(&str, (i32, u32, u32))] = &[
    ("令和", (2019, 5, 1)),
    ("平成", (1989, 1, 8)),
    ("昭和", (1926, 12, 25)),
    ("大正", (1912, 7, 30)),
    ("明治", (1868, 1, 1)),
];

fn japanese_era_date(date: NaiveDate) -> String {
    let era = JAPANESE_ERAS.iter().find_map(|(name, (year, month, day))| {
        let start = NaiveDate::from_ymd_opt(*year, *month, *day)?;
        (date >= start).then_some((*name, date.year() - start.year() + 1))
    });
    match era {
        Some((name, 1)) => format!("{name}元年{}月{}日", date.month(), date.day()),
        Some((name, year)) => format!("{name}{year}年{}月{}日", date.month(), date.day()),
        None => date.format("%Y年%-m月%-d日").to_string(),
    }
}

static ENGLISH: Labels = Labels {
    package: "package",
    class: "class",
    interfaces: "All Implemented Interfaces:",
    version: "Version:",
    author: "Author:",
    enum_constant_detail: "Enum Constant Detail",
    field_detail: "Field Detail",
    constructor_detail: "Constructor Detail",
    method_detail: "Method Detail",
    field: "field",
    enum_constant: "enum constant",
    constructor: "constructor",
    method: "method",
    parameters: "Parameters:",
    returns: "Returns:",
    throws: "Throws:",
    date_style: DateStyle::Gregorian("%B %-d, %Y"),
};

static JAPANESE: Labels = Labels {
    package: "パッケージ",
    class: "クラス",
    interfaces: "すべての実装されたインタフェース:",
    version: "バージョン:",
    author: "作成者:",
    enum_constant_detail: "定数の詳細",
    field_detail: "フィールドの詳細",
    constructor_detail: "コンストラクタの詳細",
    method_detail: "メソッドの詳細",
    field: "フィールド",
    enum_constant: "列挙型定数",
    constructor: "コンストラクタ",
    method: "メソッド",
    parameters: "パラメータ:",
    returns: "戻り値:",
    throws: "例外:",
    date_style: DateStyle::JapaneseEra,
};

impl Labels {
    /// Returns the label table of `locale`.
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::En => &ENGLISH,
            Locale::Ja => &JAPANESE,
        }
    }

    /// Label naming a member kind, shown after the member name.
    pub fn kind(&self, kind: MemberKind) -> &'static str {
        match kind {
            MemberKind::Field => self.field,
            MemberKind::EnumConstant => self.enum_constant,
            MemberKind::Constructor => self.constructor,
            MemberKind::Method => self.method,
        }
    }

    /// Long-form date as printed on the cover page.
    pub fn long_date(&self, date: NaiveDate) -> String {
        match self.date_style {
            DateStyle::Gregorian(format) => date.format(format).to_string(),
            DateStyle::JapaneseEra => japanese_era_date(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_dates_follow_locale() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 9).unwrap();
        assert_eq!(Labels::for_locale(Locale::En).long_date(date), "October 9, 2026");
        assert_eq!(Labels::for_locale(Locale::Ja).long_date(date), "令和8年10月9日");
    }

    #[test]
    fn japanese_dates_switch_era_on_its_first_day() {
        let ja = Labels::for_locale(Locale::Ja);
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(ja.long_date(day(2019, 4, 30)), "平成31年4月30日");
        assert_eq!(ja.long_date(day(2019, 5, 1)), "令和元年5月1日");
        assert_eq!(ja.long_date(day(2020, 1, 1)), "令和2年1月1日");
        assert_eq!(ja.long_date(day(1989, 1, 7)), "昭和64年1月7日");
        assert_eq!(ja.long_date(day(1850, 3, 4)), "1850年3月4日");
    }

    #[test]
    fn kind_labels_cover_all_kinds() {
        let labels = Labels::for_locale(Locale::En);
        assert_eq!(labels.kind(MemberKind::EnumConstant), "enum constant");
        assert_eq!(labels.kind(MemberKind::Method), "method");
    }
}
