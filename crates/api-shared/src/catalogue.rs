//! Response and request bodies for catalogue entities.

use chrono::NaiveDate;
use citas_core::model::{Appointment, Article, Doctor, Specialty};
use citas_core::AppointmentStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpecialtyRes {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
}

impl From<&Specialty> for SpecialtyRes {
    fn from(s: &Specialty) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            icon: s.icon.clone(),
            description: s.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRes {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub avatar: Option<String>,
    pub rating: f32,
    pub reviews_count: u32,
    pub experience: u32,
    pub languages: Vec<String>,
    pub price: u32,
    pub available: bool,
    pub next_available: Option<String>,
}

impl From<&Doctor> for DoctorRes {
    fn from(d: &Doctor) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            specialty: d.specialty.clone(),
            avatar: d.avatar.clone(),
            rating: d.rating,
            reviews_count: d.reviews_count,
            experience: d.experience,
            languages: d.languages.clone(),
            price: d.price,
            available: d.available,
            next_available: d.next_available.clone(),
        }
    }
}

/// Body of `POST /doctors`. A missing id is generated by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorReq {
    pub id: Option<String>,
    pub name: String,
    pub specialty: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub languages: Vec<String>,
    pub price: u32,
    #[serde(default)]
    pub available: bool,
    pub next_available: Option<String>,
}

impl CreateDoctorReq {
    pub fn into_doctor(self, id: String) -> Doctor {
        Doctor {
            id,
            name: self.name,
            specialty: self.specialty,
            avatar: self.avatar,
            rating: self.rating,
            reviews_count: self.reviews_count,
            experience: self.experience,
            languages: self.languages,
            price: self.price,
            available: self.available,
            next_available: self.next_available,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRes {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub author_avatar: Option<String>,
    pub image_url: String,
    pub read_time: u32,
    pub published_at: NaiveDate,
    pub tags: Vec<String>,
}

impl From<&Article> for ArticleRes {
    fn from(a: &Article) -> Self {
        Self {
            id: a.id.clone(),
            title: a.title.clone(),
            excerpt: a.excerpt.clone(),
            content: a.content.clone(),
            category: a.category.clone(),
            author: a.author.clone(),
            author_avatar: a.author_avatar.clone(),
            image_url: a.image_url.clone(),
            read_time: a.read_time,
            published_at: a.published_at,
            tags: a.tags.clone(),
        }
    }
}

/// Body of `POST /articles`. Missing id and date are filled in by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleReq {
    pub id: Option<String>,
    pub title: String,
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    pub category: String,
    pub author: String,
    pub author_avatar: Option<String>,
    pub image_url: String,
    pub read_time: u32,
    pub published_at: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateArticleReq {
    pub fn into_article(self, id: String, today: NaiveDate) -> Article {
        Article {
            id,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            author: self.author,
            author_avatar: self.author_avatar,
            image_url: self.image_url,
            read_time: self.read_time,
            published_at: self.published_at.unwrap_or(today),
            tags: self.tags,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRes {
    pub id: String,
    pub patient_name: String,
    pub patient_age: u32,
    /// `male` or `female`.
    pub patient_gender: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date: String,
    pub time: String,
    /// `presencial` or `virtual`.
    #[serde(rename = "type")]
    pub appointment_type: String,
    /// `pendiente`, `confirmada`, `completada` or `cancelada`.
    pub status: String,
    pub reason: String,
}

impl From<&Appointment> for AppointmentRes {
    fn from(a: &Appointment) -> Self {
        Self {
            id: a.id.clone(),
            patient_name: a.patient_name.clone(),
            patient_age: a.patient_age,
            patient_gender: a.patient_gender.as_str().into(),
            doctor_name: a.doctor_name.clone(),
            specialty: a.specialty.clone(),
            date: a.date.clone(),
            time: a.time.clone(),
            appointment_type: a.appointment_type.as_str().into(),
            status: a.status.as_str().into(),
            reason: a.reason.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListSpecialtiesRes {
    pub specialties: Vec<SpecialtyRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListDoctorsRes {
    pub doctors: Vec<DoctorRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListArticlesRes {
    pub articles: Vec<ArticleRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListAppointmentsRes {
    pub appointments: Vec<AppointmentRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStatsRes {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
}

impl From<AppointmentStats> for AppointmentStatsRes {
    fn from(stats: AppointmentStats) -> Self {
        let owned = |m: BTreeMap<&'static str, usize>| {
            m.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
        };
        Self {
            total: stats.total,
            by_status: owned(stats.by_status),
            by_type: owned(stats.by_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citas_core::Catalogue;

    #[test]
    fn test_appointment_res_uses_wire_values() {
        let catalogue = Catalogue::mock();
        let res = AppointmentRes::from(&catalogue.appointments[4]);
        assert_eq!(res.status, "cancelada");
        assert_eq!(res.appointment_type, "virtual");

        let json = serde_json::to_value(&res).expect("should serialise");
        assert_eq!(json["type"], "virtual");
        assert_eq!(json["patientGender"], "male");
    }

    #[test]
    fn test_create_article_defaults() {
        let req: CreateArticleReq = serde_json::from_str(
            r#"{"title":"T","excerpt":"E","category":"Bienestar","author":"A","imageUrl":"u","readTime":3}"#,
        )
        .expect("should parse");
        let today = NaiveDate::from_ymd_opt(2025, 10, 10).expect("valid date");
        let article = req.into_article("9".into(), today);
        assert_eq!(article.published_at, today);
        assert!(article.tags.is_empty());
    }
}
