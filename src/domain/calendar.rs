//! Age and birth-order labels.

use chrono::{Datelike, Local, NaiveDate};

use crate::domain::entities::FamilyMember;

/// Completed years between `birth` and `death` (or `today` when alive).
///
/// Truncates: the year only counts once the birthday has been reached.
/// A reference date before the birth date yields 0.
pub fn age_in_years(birth: NaiveDate, death: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let until = death.unwrap_or(today);
    if until <= birth {
        return 0;
    }
    let mut years = until.year() - birth.year();
    if (until.month(), until.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// `"74 years (1930–2004)"` for the deceased, `"41 years (1983)"` otherwise.
pub fn age_label(birth: NaiveDate, death: Option<NaiveDate>, today: NaiveDate) -> String {
    let years = age_in_years(birth, death, today);
    let unit = if years == 1 { "year" } else { "years" };
    match death {
        Some(death) => format!("{} {} ({}\u{2013}{})", years, unit, birth.year(), death.year()),
        None => format!("{} {} ({})", years, unit, birth.year()),
    }
}

/// [`age_label`] evaluated against the local current date.
pub fn age(birth: NaiveDate, death: Option<NaiveDate>) -> String {
    age_label(birth, death, Local::now().date_naive())
}

/// English ordinal suffix: 11–13 take "th", otherwise the last digit decides.
pub fn ordinal_suffix(n: u64) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

pub fn ordinal(n: u64) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

/// Birth-order label of `child_id` among the parent's sorted children,
/// e.g. `"2nd child of Maria Santos (of 4)"`.
///
/// `siblings` must be the parent's full child list in tree order.
/// Returns `None` when the child is not in that list.
pub fn ordinal_label(
    child_id: &str,
    parent: &FamilyMember,
    siblings: &[&FamilyMember],
) -> Option<String> {
    let position = siblings
        .iter()
        .position(|sibling| sibling.id.as_str() == child_id)?;
    Some(format!(
        "{} child of {} (of {})",
        ordinal(position as u64 + 1),
        parent.display_name(),
        siblings.len()
    ))
}
