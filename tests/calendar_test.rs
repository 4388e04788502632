use chrono::NaiveDate;
use rstest::rstest;

use kintree::domain::{age_in_years, age_label, ordinal_label, FamilyMember, Gender};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn given_living_member_when_computing_age_then_completed_years() {
    assert_eq!(age_in_years(date(1950, 1, 1), None, date(2024, 6, 1)), 74);
}

#[test]
fn given_deceased_member_when_labelling_then_year_range_shown() {
    let label = age_label(date(1950, 1, 1), Some(date(2020, 1, 1)), date(2024, 6, 1));
    assert_eq!(label, "70 years (1950\u{2013}2020)");
}

#[rstest]
#[case(date(1950, 6, 2), date(2024, 6, 1), 73)]
#[case(date(2000, 2, 29), date(2001, 2, 28), 0)]
#[case(date(2000, 2, 29), date(2001, 3, 1), 1)]
fn given_birthday_boundary_when_computing_age_then_counts_completed_years(
    #[case] birth: NaiveDate,
    #[case] today: NaiveDate,
    #[case] expected: u32,
) {
    assert_eq!(age_in_years(birth, None, today), expected);
}

#[test]
fn given_living_member_when_labelling_then_birth_year_only() {
    let label = age_label(date(1983, 1, 1), None, date(2024, 6, 1));
    assert_eq!(label, "41 years (1983)");
}

#[test]
fn given_three_children_when_labelling_then_ordinals_follow_birth_order() {
    // Arrange: siblings already sorted oldest first
    let parent = FamilyMember::new("p", "Maria", "Santos", Gender::Female);
    let c1 = FamilyMember::new("c1", "Ana", "Lima", Gender::Female).born(date(1980, 1, 1));
    let c2 = FamilyMember::new("c2", "Bruno", "Lima", Gender::Male).born(date(1982, 1, 1));
    let c3 = FamilyMember::new("c3", "Clara", "Lima", Gender::Female).born(date(1985, 1, 1));
    let siblings = vec![&c1, &c2, &c3];

    // Act
    let labels: Vec<Option<String>> = ["c1", "c2", "c3"]
        .iter()
        .map(|id| ordinal_label(id, &parent, &siblings))
        .collect();

    // Assert
    assert_eq!(
        labels,
        vec![
            Some("1st child of Maria Santos (of 3)".to_string()),
            Some("2nd child of Maria Santos (of 3)".to_string()),
            Some("3rd child of Maria Santos (of 3)".to_string()),
        ]
    );
}

#[test]
fn given_member_outside_siblings_when_labelling_then_none() {
    let parent = FamilyMember::new("p", "Maria", "Santos", Gender::Female);
    let c1 = FamilyMember::new("c1", "Ana", "Lima", Gender::Female);

    assert_eq!(ordinal_label("zz", &parent, &[&c1]), None);
}
