//! Seed data for the in-memory store.
//!
//! A [`Catalogue`] is either the built-in mock data or a YAML file with the same shape:
//!
//! ```yaml
//! specialties:
//!   - { id: "1", name: Cardiología, icon: "❤️", description: Especialistas del corazón }
//! doctors: []
//! articles: []
//! appointments: []
//! ```
//!
//! Every collection is optional in the file. After parsing, the entity invariants (unique ids,
//! rating in `[0, 5]`, positive reading time) are checked before the catalogue is handed out.

use crate::config::CoreConfig;
use crate::model::{
    first_duplicate_id, Appointment, AppointmentStatus, AppointmentType, Article, Doctor,
    Entity, Gender, Specialty,
};
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Catalogue {
    pub specialties: Vec<Specialty>,
    pub doctors: Vec<Doctor>,
    pub articles: Vec<Article>,
    pub appointments: Vec<Appointment>,
}

impl Catalogue {
    /// Loads the catalogue named by the configuration, or the mock data if none is configured.
    pub fn from_config(cfg: &CoreConfig) -> CoreResult<Self> {
        match cfg.catalogue_file() {
            Some(path) => Self::load(path),
            None => {
                tracing::info!("using built-in mock catalogue");
                Ok(Self::mock())
            }
        }
    }

    /// Reads and validates a YAML catalogue file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(CoreError::FileRead)?;
        let catalogue = Self::parse(&text)?;
        tracing::info!(
            "loaded catalogue from {}: {} doctors, {} articles, {} appointments",
            path.display(),
            catalogue.doctors.len(),
            catalogue.articles.len(),
            catalogue.appointments.len()
        );
        Ok(catalogue)
    }

    /// Parses YAML text, reporting the path of the first field that does not fit the schema.
    pub fn parse(yaml_text: &str) -> CoreResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let catalogue = match serde_path_to_error::deserialize::<_, Catalogue>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() {
                    "<root>".to_string()
                } else {
                    path
                };
                return Err(CoreError::YamlDeserialization {
                    path,
                    source: err.into_inner(),
                });
            }
        };

        catalogue.validate()?;
        Ok(catalogue)
    }

    /// Checks the entity invariants across every collection.
    pub fn validate(&self) -> CoreResult<()> {
        check_unique(&self.specialties)?;
        check_unique(&self.doctors)?;
        check_unique(&self.articles)?;
        check_unique(&self.appointments)?;

        if let Some(doctor) = self.doctors.iter().find(|d| !d.has_valid_rating()) {
            return Err(CoreError::InvalidCatalogue(format!(
                "doctor {} has rating {} outside [0, 5]",
                doctor.id, doctor.rating
            )));
        }

        if let Some(article) = self.articles.iter().find(|a| a.read_time == 0) {
            return Err(CoreError::InvalidCatalogue(format!(
                "article {} must have a positive read time",
                article.id
            )));
        }

        Ok(())
    }

    /// The product's demo data: six specialties, six doctors, four articles, six appointments.
    pub fn mock() -> Self {
        Self {
            specialties: mock_specialties(),
            doctors: mock_doctors(),
            articles: mock_articles(),
            appointments: mock_appointments(),
        }
    }
}

fn check_unique<T: Entity>(items: &[T]) -> CoreResult<()> {
    match first_duplicate_id(items) {
        Some(id) => Err(CoreError::DuplicateId {
            collection: T::COLLECTION,
            id: id.to_string(),
        }),
        None => Ok(()),
    }
}

fn specialty(id: &str, name: &str, icon: &str, description: &str) -> Specialty {
    Specialty {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        description: description.into(),
    }
}

fn mock_specialties() -> Vec<Specialty> {
    vec![
        specialty("1", "Medicina General", "🩺", "Atención médica integral"),
        specialty("2", "Cardiología", "❤️", "Especialistas del corazón"),
        specialty("3", "Dermatología", "🧴", "Cuidado de la piel"),
        specialty("4", "Pediatría", "👶", "Salud infantil"),
        specialty("5", "Psicología", "🧠", "Salud mental"),
        specialty("6", "Nutrición", "🥗", "Alimentación saludable"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn doctor(
    id: &str,
    name: &str,
    specialty: &str,
    avatar_img: u32,
    rating: f32,
    reviews_count: u32,
    experience: u32,
    languages: &[&str],
    price: u32,
    next_available: Option<&str>,
) -> Doctor {
    Doctor {
        id: id.into(),
        name: name.into(),
        specialty: specialty.into(),
        avatar: Some(format!("https://i.pravatar.cc/150?img={avatar_img}")),
        rating,
        reviews_count,
        experience,
        languages: languages.iter().map(|l| l.to_string()).collect(),
        price,
        available: next_available.is_some(),
        next_available: next_available.map(str::to_string),
    }
}

fn mock_doctors() -> Vec<Doctor> {
    vec![
        doctor(
            "1",
            "Dr. Carlos Ramírez",
            "Medicina General",
            12,
            4.8,
            156,
            12,
            &["Español", "Inglés"],
            50000,
            Some("Hoy a las 3:00 PM"),
        ),
        doctor(
            "2",
            "Dra. María González",
            "Cardiología",
            5,
            4.9,
            203,
            15,
            &["Español", "Inglés", "Francés"],
            80000,
            Some("Mañana a las 10:00 AM"),
        ),
        doctor(
            "3",
            "Dr. Luis Martínez",
            "Dermatología",
            33,
            4.7,
            98,
            8,
            &["Español"],
            60000,
            None,
        ),
        doctor(
            "4",
            "Dra. Ana Rodríguez",
            "Pediatría",
            9,
            5.0,
            187,
            10,
            &["Español", "Inglés"],
            55000,
            Some("Hoy a las 5:00 PM"),
        ),
        doctor(
            "5",
            "Dra. Laura Pérez",
            "Psicología",
            10,
            4.9,
            142,
            7,
            &["Español", "Inglés"],
            70000,
            Some("Mañana a las 2:00 PM"),
        ),
        doctor(
            "6",
            "Dr. Jorge Silva",
            "Nutrición",
            15,
            4.6,
            76,
            5,
            &["Español"],
            45000,
            Some("Hoy a las 4:00 PM"),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn article(
    id: &str,
    title: &str,
    excerpt: &str,
    category: &str,
    author: &str,
    image: &str,
    read_time: u32,
    published: (i32, u32, u32),
    tags: &[&str],
) -> Article {
    Article {
        id: id.into(),
        title: title.into(),
        excerpt: excerpt.into(),
        content: "Contenido completo del artículo...".into(),
        category: category.into(),
        author: author.into(),
        author_avatar: None,
        image_url: format!("https://images.unsplash.com/{image}?w=800"),
        read_time,
        published_at: NaiveDate::from_ymd_opt(published.0, published.1, published.2)
            .unwrap_or_default(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn mock_articles() -> Vec<Article> {
    vec![
        article(
            "1",
            "La importancia de la prevención cardiovascular",
            "Descubre cómo cuidar tu corazón con hábitos saludables y chequeos regulares.",
            "Cardiología",
            "Dra. María González",
            "photo-1505751172876-fa1923c5c528",
            5,
            (2025, 9, 15),
            &["corazón", "prevención", "salud"],
        ),
        article(
            "2",
            "Alimentación balanceada: tu mejor medicina",
            "Los nutrientes esenciales que tu cuerpo necesita para funcionar correctamente.",
            "Nutrición",
            "Dr. Jorge Silva",
            "photo-1490645935967-10de6ba17061",
            7,
            (2025, 9, 20),
            &["nutrición", "alimentación", "bienestar"],
        ),
        article(
            "3",
            "Salud mental en tiempos modernos",
            "Estrategias para manejar el estrés y la ansiedad en la vida cotidiana.",
            "Salud Mental",
            "Dra. Laura Pérez",
            "photo-1506126613408-eca07ce68773",
            6,
            (2025, 9, 25),
            &["salud mental", "estrés", "bienestar"],
        ),
        article(
            "4",
            "Cuidados de la piel en todas las edades",
            "Rutinas dermatológicas adaptadas a cada etapa de la vida.",
            "Dermatología",
            "Dr. Luis Martínez",
            "photo-1556228578-0d85b1a4d571",
            4,
            (2025, 9, 28),
            &["piel", "cuidado", "dermatología"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn appointment(
    id: &str,
    patient: (&str, u32, Gender),
    doctor_name: &str,
    specialty: &str,
    date: &str,
    time: &str,
    appointment_type: AppointmentType,
    status: AppointmentStatus,
    reason: &str,
) -> Appointment {
    Appointment {
        id: id.into(),
        patient_name: patient.0.into(),
        patient_age: patient.1,
        patient_gender: patient.2,
        doctor_name: doctor_name.into(),
        specialty: specialty.into(),
        date: date.into(),
        time: time.into(),
        appointment_type,
        status,
        reason: reason.into(),
    }
}

fn mock_appointments() -> Vec<Appointment> {
    use AppointmentStatus::*;
    use AppointmentType::*;
    use Gender::*;

    vec![
        appointment(
            "1",
            ("Juan Pérez", 45, Male),
            "Dra. María González",
            "Cardiología",
            "2025-10-05",
            "10:00",
            Virtual,
            Confirmada,
            "Control de presión arterial",
        ),
        appointment(
            "2",
            ("Ana Martínez", 32, Female),
            "Dr. Carlos Ramírez",
            "Medicina General",
            "2025-10-05",
            "11:30",
            Presencial,
            Pendiente,
            "Consulta general",
        ),
        appointment(
            "3",
            ("Pedro Gómez", 28, Male),
            "Dra. Laura Torres",
            "Dermatología",
            "2025-10-06",
            "09:00",
            Virtual,
            Completada,
            "Revisión de tratamiento",
        ),
        appointment(
            "4",
            ("María López", 67, Female),
            "Dr. José Hernández",
            "Geriatría",
            "2025-10-06",
            "14:00",
            Presencial,
            Confirmada,
            "Chequeo anual",
        ),
        appointment(
            "5",
            ("Roberto Silva", 19, Male),
            "Dra. Carmen Ruiz",
            "Psicología",
            "2025-10-07",
            "16:00",
            Virtual,
            Cancelada,
            "Terapia",
        ),
        appointment(
            "6",
            ("Lucía Fernández", 41, Female),
            "Dr. Miguel Ángel",
            "Nutrición",
            "2025-10-08",
            "10:30",
            Presencial,
            Pendiente,
            "Plan alimenticio",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mock_catalogue_is_valid() {
        let catalogue = Catalogue::mock();
        catalogue.validate().expect("mock data should satisfy invariants");

        assert_eq!(catalogue.specialties.len(), 6);
        assert_eq!(catalogue.doctors.len(), 6);
        assert_eq!(catalogue.articles.len(), 4);
        assert_eq!(catalogue.appointments.len(), 6);

        let unavailable: Vec<_> = catalogue
            .doctors
            .iter()
            .filter(|d| !d.available)
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(unavailable, ["3"]);
    }

    #[test]
    fn test_parse_reads_camel_case_yaml() {
        let yaml = r#"
doctors:
  - id: "10"
    name: Dr. Test
    specialty: Neurología
    rating: 4.5
    reviewsCount: 3
    experience: 2
    languages: [Español]
    price: 40000
    available: true
    nextAvailable: Hoy
articles:
  - id: a1
    title: T
    excerpt: E
    content: C
    category: Bienestar
    author: A
    imageUrl: https://example.com/x.png
    readTime: 3
    publishedAt: 2025-10-01
    tags: [x]
"#;
        let catalogue = Catalogue::parse(yaml).expect("should parse catalogue");
        assert!(catalogue.specialties.is_empty());
        assert_eq!(catalogue.doctors[0].specialty, "Neurología");
        assert_eq!(catalogue.doctors[0].next_available.as_deref(), Some("Hoy"));
        assert_eq!(
            catalogue.articles[0].published_at,
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_reports_failing_field_path() {
        let yaml = r#"
appointments:
  - id: "1"
    patientName: X
    patientAge: 40
    patientGender: other
    doctorName: Y
    specialty: Z
    date: "2025-10-05"
    time: "10:00"
    type: virtual
    status: pendiente
    reason: R
"#;
        let err = Catalogue::parse(yaml).expect_err("unknown gender should fail");
        match err {
            CoreError::YamlDeserialization { path, .. } => {
                assert_eq!(path, "appointments[0].patientGender");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let yaml = r#"
specialties:
  - { id: "1", name: A, icon: a, description: a }
  - { id: "1", name: B, icon: b, description: b }
"#;
        let err = Catalogue::parse(yaml).expect_err("duplicate id should fail");
        assert!(matches!(
            err,
            CoreError::DuplicateId { collection: "specialty", ref id } if id == "1"
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        let mut catalogue = Catalogue::mock();
        catalogue.doctors[0].rating = 5.5;
        let err = catalogue.validate().expect_err("rating above 5 should fail");
        assert!(matches!(err, CoreError::InvalidCatalogue(msg) if msg.contains("rating")));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("catalogue.yaml");
        let yaml = serde_yaml::to_string(&Catalogue::mock()).expect("should render YAML");
        fs::write(&path, yaml).expect("should write catalogue");

        let loaded = Catalogue::load(&path).expect("should load catalogue");
        assert_eq!(loaded, Catalogue::mock());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = Catalogue::load(&temp_dir.path().join("missing.yaml"))
            .expect_err("missing file should fail");
        assert!(matches!(err, CoreError::FileRead(_)));
    }
}
