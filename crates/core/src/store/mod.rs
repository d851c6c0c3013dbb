//! Application state container.
//!
//! One [`Store`] holds a [`Slice`] per entity. State only changes through [`Store::dispatch`],
//! which routes an [`Action`] to the reducer of the slice it names. Filtered views are derived
//! from the items and the current [`Selection`] on every read and are never stored.

pub mod appointments;
pub mod articles;
pub mod doctors;

pub use appointments::AppointmentAction;
pub use articles::ArticleAction;
pub use doctors::DoctorAction;

use crate::catalogue::Catalogue;
use crate::filter::{self, FilterSet, Selection};
use crate::model::{first_duplicate_id, Appointment, Article, Doctor, Entity, Specialty};
use crate::stats::AppointmentStats;
use crate::{CoreError, CoreResult};

/// Items of one entity plus the filter state of the page that lists them.
#[derive(Debug)]
pub struct Slice<T> {
    items: Vec<T>,
    filters: FilterSet<T>,
    selection: Selection,
    selected: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl<T: Entity> Slice<T> {
    fn new(items: Vec<T>, filters: FilterSet<T>) -> Self {
        Self {
            items,
            filters,
            selection: Selection::new(),
            selected: None,
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filters(&self) -> &FilterSet<T> {
        &self.filters
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Items matching the current selection, in catalogue order.
    pub fn visible(&self) -> Vec<&T> {
        self.filters.apply(&self.items, &self.selection)
    }

    /// Items matching an ad-hoc selection; the stored selection is ignored.
    pub fn query(&self, selection: &Selection) -> Vec<&T> {
        self.filters.apply(&self.items, selection)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn replace_items(&mut self, items: Vec<T>) -> CoreResult<()> {
        if let Some(id) = first_duplicate_id(&items) {
            return Err(CoreError::DuplicateId {
                collection: T::COLLECTION,
                id: id.to_string(),
            });
        }
        tracing::info!("replaced {} list with {} items", T::COLLECTION, items.len());
        self.items = items;
        if self.selected().is_none() {
            self.selected = None;
        }
        Ok(())
    }

    fn ensure_new_id(&self, item: &T) -> CoreResult<()> {
        if self.get(item.id()).is_some() {
            return Err(CoreError::DuplicateId {
                collection: T::COLLECTION,
                id: item.id().to_string(),
            });
        }
        Ok(())
    }

    fn append(&mut self, item: T) -> CoreResult<()> {
        self.ensure_new_id(&item)?;
        tracing::info!("added {} {}", T::COLLECTION, item.id());
        self.items.push(item);
        Ok(())
    }

    fn prepend(&mut self, item: T) -> CoreResult<()> {
        self.ensure_new_id(&item)?;
        tracing::info!("added {} {}", T::COLLECTION, item.id());
        self.items.insert(0, item);
        Ok(())
    }

    fn set_filter(&mut self, key: &str, value: String) {
        if self.filters.criterion(key).is_none() {
            tracing::warn!("ignoring unknown {} filter '{key}'", T::COLLECTION);
            return;
        }
        self.selection.set(key, value);
    }

    fn reset_filters(&mut self) {
        self.selection = Selection::new();
    }

    fn select(&mut self, id: Option<String>) -> CoreResult<()> {
        if let Some(id) = &id {
            if self.get(id).is_none() {
                return Err(CoreError::NotFound {
                    collection: T::COLLECTION,
                    id: id.clone(),
                });
            }
        }
        self.selected = id;
        Ok(())
    }
}

/// Every state change the application can make.
#[derive(Clone, Debug)]
pub enum Action {
    Doctors(DoctorAction),
    Articles(ArticleAction),
    Appointments(AppointmentAction),
}

impl From<DoctorAction> for Action {
    fn from(action: DoctorAction) -> Self {
        Action::Doctors(action)
    }
}

impl From<ArticleAction> for Action {
    fn from(action: ArticleAction) -> Self {
        Action::Articles(action)
    }
}

impl From<AppointmentAction> for Action {
    fn from(action: AppointmentAction) -> Self {
        Action::Appointments(action)
    }
}

#[derive(Debug)]
pub struct Store {
    specialties: Vec<Specialty>,
    pub doctors: Slice<Doctor>,
    pub articles: Slice<Article>,
    pub appointments: Slice<Appointment>,
}

impl Store {
    /// Builds a store over `catalogue`, using `sentinel` as the "no constraint" value of every
    /// filter.
    pub fn new(catalogue: Catalogue, sentinel: &str) -> Self {
        Self {
            specialties: catalogue.specialties,
            doctors: Slice::new(catalogue.doctors, filter::doctor_filters(sentinel)),
            articles: Slice::new(catalogue.articles, filter::article_filters(sentinel)),
            appointments: Slice::new(
                catalogue.appointments,
                filter::appointment_filters(sentinel),
            ),
        }
    }

    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn appointment_stats(&self) -> AppointmentStats {
        AppointmentStats::from_appointments(self.appointments.items())
    }

    /// Applies one action. On error the state is unchanged.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> CoreResult<()> {
        match action.into() {
            Action::Doctors(action) => doctors::reduce(&mut self.doctors, action),
            Action::Articles(action) => articles::reduce(&mut self.articles, action),
            Action::Appointments(action) => appointments::reduce(&mut self.appointments, action),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Catalogue::mock(), crate::constants::DEFAULT_SENTINEL)
    }
}
