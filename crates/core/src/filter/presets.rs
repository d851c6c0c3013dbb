//! Filter sets for the directory, the articles page and the admin dashboard.

use super::{Bucket, Criterion, Field, FilterSet, Matcher};
use crate::constants::{ADULT_MIN_AGE, SENIOR_MIN_AGE};
use crate::model::{Appointment, Article, Doctor};

/// Criterion keys, shared by the REST query strings and the CLI flags.
pub mod keys {
    pub const QUERY: &str = "q";
    pub const SPECIALTY: &str = "specialty";
    pub const AVAILABILITY: &str = "availability";
    pub const LANGUAGE: &str = "language";
    pub const CATEGORY: &str = "category";
    pub const STATUS: &str = "status";
    pub const GENDER: &str = "gender";
    pub const AGE: &str = "age";
    pub const TYPE: &str = "type";
}

/// Value of the availability criterion that keeps only bookable doctors.
pub const AVAILABLE: &str = "available";

/// Patient age brackets: `young` < 30 ≤ `adult` < 60 ≤ `senior`.
pub const AGE_BRACKETS: &[Bucket] = &[
    Bucket {
        name: "young",
        min: None,
        max: Some(ADULT_MIN_AGE),
    },
    Bucket {
        name: "adult",
        min: Some(ADULT_MIN_AGE),
        max: Some(SENIOR_MIN_AGE),
    },
    Bucket {
        name: "senior",
        min: Some(SENIOR_MIN_AGE),
        max: None,
    },
];

fn doctor_name(d: &Doctor) -> &str {
    &d.name
}

fn doctor_specialty(d: &Doctor) -> &str {
    &d.specialty
}

fn doctor_languages(d: &Doctor) -> &[String] {
    &d.languages
}

fn doctor_available(d: &Doctor) -> bool {
    d.available
}

/// Doctor directory: free text over name and specialty, specialty, availability, language.
pub fn doctor_filters(sentinel: &str) -> FilterSet<Doctor> {
    FilterSet::new()
        .with(
            Criterion::new(
                keys::QUERY,
                Matcher::Text(vec![
                    Field::Scalar(doctor_name),
                    Field::Scalar(doctor_specialty),
                ]),
            )
            .with_sentinel(sentinel),
        )
        .with(
            Criterion::new(keys::SPECIALTY, Matcher::Equals(doctor_specialty))
                .with_sentinel(sentinel),
        )
        .with(
            Criterion::new(
                keys::AVAILABILITY,
                Matcher::Flag {
                    field: doctor_available,
                    when_true: AVAILABLE,
                    when_false: None,
                },
            )
            .with_sentinel(sentinel),
        )
        .with(
            Criterion::new(
                keys::LANGUAGE,
                Matcher::Member {
                    field: doctor_languages,
                    ignore_case: true,
                },
            )
            .with_sentinel(sentinel),
        )
}

fn article_title(a: &Article) -> &str {
    &a.title
}

fn article_excerpt(a: &Article) -> &str {
    &a.excerpt
}

fn article_tags(a: &Article) -> &[String] {
    &a.tags
}

fn article_category(a: &Article) -> &str {
    &a.category
}

/// Articles: free text over title, excerpt and tags, plus category.
pub fn article_filters(sentinel: &str) -> FilterSet<Article> {
    FilterSet::new()
        .with(
            Criterion::new(
                keys::QUERY,
                Matcher::Text(vec![
                    Field::Scalar(article_title),
                    Field::Scalar(article_excerpt),
                    Field::List(article_tags),
                ]),
            )
            .with_sentinel(sentinel),
        )
        .with(
            Criterion::new(keys::CATEGORY, Matcher::Equals(article_category))
                .with_sentinel(sentinel),
        )
}

fn appointment_patient(a: &Appointment) -> &str {
    &a.patient_name
}

fn appointment_doctor(a: &Appointment) -> &str {
    &a.doctor_name
}

fn appointment_specialty(a: &Appointment) -> &str {
    &a.specialty
}

fn appointment_status(a: &Appointment) -> &str {
    a.status.as_str()
}

fn appointment_gender(a: &Appointment) -> &str {
    a.patient_gender.as_str()
}

fn appointment_type(a: &Appointment) -> &str {
    a.appointment_type.as_str()
}

fn appointment_age(a: &Appointment) -> u32 {
    a.patient_age
}

/// Admin dashboard: free text over patient, doctor and specialty, then status, gender, age
/// bracket and consultation type.
pub fn appointment_filters(sentinel: &str) -> FilterSet<Appointment> {
    FilterSet::new()
        .with(
            Criterion::new(
                keys::QUERY,
                Matcher::Text(vec![
                    Field::Scalar(appointment_patient),
                    Field::Scalar(appointment_doctor),
                    Field::Scalar(appointment_specialty),
                ]),
            )
            .with_sentinel(sentinel),
        )
        .with(
            Criterion::new(keys::STATUS, Matcher::Equals(appointment_status))
                .with_sentinel(sentinel),
        )
        .with(
            Criterion::new(keys::GENDER, Matcher::Equals(appointment_gender))
                .with_sentinel(sentinel),
        )
        .with(
            Criterion::new(
                keys::AGE,
                Matcher::Bucket {
                    field: appointment_age,
                    buckets: AGE_BRACKETS,
                },
            )
            .with_sentinel(sentinel),
        )
        .with(
            Criterion::new(keys::TYPE, Matcher::Equals(appointment_type))
                .with_sentinel(sentinel),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Catalogue;
    use crate::constants::{DEFAULT_SENTINEL, DISPLAY_SENTINEL};
    use crate::filter::Selection;

    fn ids<T: crate::model::Entity>(found: &[&T]) -> Vec<String> {
        found.iter().map(|e| e.id().to_string()).collect()
    }

    fn bracket_names(age: u32) -> Vec<&'static str> {
        AGE_BRACKETS
            .iter()
            .filter(|b| b.contains(age))
            .map(|b| b.name)
            .collect()
    }

    #[test]
    fn test_age_bracket_boundaries() {
        assert_eq!(bracket_names(29), ["young"]);
        assert_eq!(bracket_names(30), ["adult"]);
        assert_eq!(bracket_names(59), ["adult"]);
        assert_eq!(bracket_names(60), ["senior"]);
        assert_eq!(bracket_names(0), ["young"]);
    }

    #[test]
    fn test_doctors_by_specialty() {
        let catalogue = Catalogue::mock();
        let set = doctor_filters(DEFAULT_SENTINEL);
        let found = set.apply(
            &catalogue.doctors,
            &Selection::new().with(keys::SPECIALTY, "Cardiología"),
        );
        assert_eq!(ids(&found), ["2"]);
    }

    #[test]
    fn test_doctors_by_specialty_text_query() {
        let catalogue = Catalogue::mock();
        let set = doctor_filters(DEFAULT_SENTINEL);

        // Only the specialty field contains this text; the doctor's name does not.
        let found = set.apply(&catalogue.doctors, &Selection::new().with(keys::QUERY, "CARDIO"));
        assert_eq!(ids(&found), ["2"]);
        assert!(!found[0].name.to_lowercase().contains("cardio"));

        let found = set.apply(&catalogue.doctors, &Selection::new().with(keys::QUERY, "logía"));
        assert_eq!(ids(&found), ["2", "3", "5"]);
    }

    #[test]
    fn test_doctors_by_availability_and_language() {
        let catalogue = Catalogue::mock();
        let set = doctor_filters(DEFAULT_SENTINEL);

        let found = set.apply(
            &catalogue.doctors,
            &Selection::new().with(keys::AVAILABILITY, AVAILABLE),
        );
        assert_eq!(ids(&found), ["1", "2", "4", "5", "6"]);

        let found = set.apply(
            &catalogue.doctors,
            &Selection::new().with(keys::LANGUAGE, "francés"),
        );
        assert_eq!(ids(&found), ["2"]);

        let found = set.apply(
            &catalogue.doctors,
            &Selection::new()
                .with(keys::LANGUAGE, "Inglés")
                .with(keys::QUERY, "dra."),
        );
        assert_eq!(ids(&found), ["2", "4", "5"]);
    }

    #[test]
    fn test_appointments_by_status() {
        let catalogue = Catalogue::mock();
        let set = appointment_filters(DEFAULT_SENTINEL);
        let found = set.apply(
            &catalogue.appointments,
            &Selection::new().with(keys::STATUS, "cancelada"),
        );
        assert_eq!(ids(&found), ["5"]);
    }

    #[test]
    fn test_appointments_by_gender_age_and_type() {
        let catalogue = Catalogue::mock();
        let set = appointment_filters(DEFAULT_SENTINEL);

        let found = set.apply(
            &catalogue.appointments,
            &Selection::new()
                .with(keys::GENDER, "female")
                .with(keys::AGE, "adult"),
        );
        assert_eq!(ids(&found), ["2", "6"]);

        let found = set.apply(
            &catalogue.appointments,
            &Selection::new()
                .with(keys::TYPE, "virtual")
                .with(keys::AGE, "young"),
        );
        assert_eq!(ids(&found), ["3", "5"]);

        let found = set.apply(
            &catalogue.appointments,
            &Selection::new().with(keys::QUERY, "psico"),
        );
        assert_eq!(ids(&found), ["5"]);
    }

    #[test]
    fn test_articles_with_display_sentinel() {
        let catalogue = Catalogue::mock();
        let set = article_filters(DISPLAY_SENTINEL);

        let found = set.apply(
            &catalogue.articles,
            &Selection::new().with(keys::CATEGORY, DISPLAY_SENTINEL),
        );
        assert_eq!(found.len(), catalogue.articles.len());

        let found = set.apply(
            &catalogue.articles,
            &Selection::new().with(keys::CATEGORY, "Nutrición"),
        );
        assert_eq!(ids(&found), ["2"]);

        let found = set.apply(
            &catalogue.articles,
            &Selection::new().with(keys::QUERY, "bienestar"),
        );
        assert_eq!(ids(&found), ["2", "3"]);
    }
}
