use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use citas_core::auth::{AuthProvider, FakeAuthProvider, FileSessionStore, NewUserProfile};
use citas_core::filter::keys;
use citas_core::model::User;
use citas_core::validation::{
    AppointmentDraft, DoctorDraft, LoginDraft, PatientDraft, RegistrationDraft,
};
use citas_core::{Catalogue, CoreConfig, FieldErrors, Selection, Store, Validate};
use citas_gateway::{HttpGateway, Record, Resource};

#[derive(Parser)]
#[command(name = "citas")]
#[command(about = "Citas medical appointment booking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List medical specialties
    Specialties,
    /// Search the doctor directory
    Doctors {
        /// Free text over name and specialty
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
        /// `available` keeps only bookable doctors
        #[arg(long)]
        availability: Option<String>,
        #[arg(long)]
        language: Option<String>,
    },
    /// List health articles
    Articles {
        /// Free text over title, excerpt and tags
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// List appointments as seen on the admin dashboard
    Appointments {
        /// Free text over patient, doctor and specialty
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// young, adult or senior
        #[arg(long)]
        age: Option<String>,
        #[arg(long = "type")]
        appointment_type: Option<String>,
    },
    /// Appointment counts by status and type
    Stats,
    /// Validate a form submission stored as JSON
    Validate {
        kind: FormKind,
        /// Path to the JSON body
        file: PathBuf,
    },
    /// Talk to the persistence backend
    Remote {
        /// medicos, pacientes or citas
        resource: Resource,
        #[command(subcommand)]
        action: RemoteAction,
    },
    /// Sign in and persist the session
    Login {
        email: Option<String>,
        password: Option<String>,
        /// Use the Google popup flow instead of email and password
        #[arg(long)]
        google: bool,
    },
    /// Create an account from a registration form stored as JSON
    Register {
        file: PathBuf,
    },
    /// Show the signed-in user
    Whoami,
    /// Sign out and clear the session
    Logout,
}

#[derive(Subcommand)]
enum RemoteAction {
    List,
    Get { id: u64 },
    Delete { id: u64 },
    /// Create a record from a draft stored as JSON
    Create { file: PathBuf },
    /// Replace a record with a draft stored as JSON
    Update { id: u64, file: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormKind {
    Appointment,
    Doctor,
    Patient,
    Registration,
    Login,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("citas_cli=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = CoreConfig::from_env()?;

    match cli.command {
        Some(Commands::Specialties) => {
            let store = load_store(&cfg)?;
            for s in store.specialties() {
                println!("{} {} - {}", s.icon, s.name, s.description);
            }
        }
        Some(Commands::Doctors {
            q,
            specialty,
            availability,
            language,
        }) => {
            let store = load_store(&cfg)?;
            let selection = selection([
                (keys::QUERY, q),
                (keys::SPECIALTY, specialty),
                (keys::AVAILABILITY, availability),
                (keys::LANGUAGE, language),
            ]);
            let doctors = store.doctors.query(&selection);
            if doctors.is_empty() {
                println!("No doctors found.");
            }
            for d in doctors {
                println!(
                    "ID: {}, Name: {}, Specialty: {}, Rating: {:.1}, Next: {}",
                    d.id,
                    d.name,
                    d.specialty,
                    d.rating,
                    d.next_available.as_deref().unwrap_or("no disponible")
                );
            }
        }
        Some(Commands::Articles { q, category }) => {
            let store = load_store(&cfg)?;
            let selection = selection([(keys::QUERY, q), (keys::CATEGORY, category)]);
            let articles = store.articles.query(&selection);
            if articles.is_empty() {
                println!("No articles found.");
            }
            for a in articles {
                println!(
                    "ID: {}, Title: {}, Category: {}, Published: {}, {} min",
                    a.id, a.title, a.category, a.published_at, a.read_time
                );
            }
        }
        Some(Commands::Appointments {
            q,
            status,
            gender,
            age,
            appointment_type,
        }) => {
            let store = load_store(&cfg)?;
            let selection = selection([
                (keys::QUERY, q),
                (keys::STATUS, status),
                (keys::GENDER, gender),
                (keys::AGE, age),
                (keys::TYPE, appointment_type),
            ]);
            let appointments = store.appointments.query(&selection);
            if appointments.is_empty() {
                println!("No appointments found.");
            }
            for a in appointments {
                println!(
                    "ID: {}, Patient: {} ({}), Doctor: {}, {} {}, {}, {}",
                    a.id,
                    a.patient_name,
                    a.patient_age,
                    a.doctor_name,
                    a.date,
                    a.time,
                    a.appointment_type,
                    a.status
                );
            }
        }
        Some(Commands::Stats) => {
            let store = load_store(&cfg)?;
            let stats = store.appointment_stats();
            println!("Total: {}", stats.total);
            for (status, count) in &stats.by_status {
                println!("  {status}: {count}");
            }
            for (kind, count) in &stats.by_type {
                println!("  {kind}: {count}");
            }
        }
        Some(Commands::Validate { kind, file }) => {
            let errors = validate_file(kind, &file)?;
            if errors.is_empty() {
                println!("Valid.");
            } else {
                print_errors(&errors);
                anyhow::bail!("{} field(s) failed validation", errors.len());
            }
        }
        Some(Commands::Remote { resource, action }) => {
            let gateway = HttpGateway::from_config(&cfg)?;
            run_remote(&gateway, resource, action).await?;
        }
        Some(Commands::Login {
            email,
            password,
            google,
        }) => {
            let auth = auth_provider(&cfg);
            let user = if google {
                auth.login_google().await?
            } else {
                let draft = LoginDraft {
                    email: email.unwrap_or_default(),
                    password: password.unwrap_or_default(),
                };
                check(draft.validate())?;
                auth.login(&draft.email, &draft.password).await?
            };
            print_user(&user);
        }
        Some(Commands::Register { file }) => {
            let draft: RegistrationDraft = read_json(&file)?;
            check(draft.validate())?;
            let auth = auth_provider(&cfg);
            let user = auth
                .register(&draft.email, &draft.password, NewUserProfile::from(&draft))
                .await?;
            print_user(&user);
        }
        Some(Commands::Whoami) => match auth_provider(&cfg).restore().await? {
            Some(user) => print_user(&user),
            None => println!("Not signed in."),
        },
        Some(Commands::Logout) => {
            auth_provider(&cfg).logout().await?;
            println!("Signed out.");
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn load_store(cfg: &CoreConfig) -> anyhow::Result<Store> {
    let catalogue = Catalogue::from_config(cfg)?;
    Ok(Store::new(catalogue, cfg.filter_sentinel()))
}

fn auth_provider(cfg: &CoreConfig) -> FakeAuthProvider {
    let session = Arc::new(FileSessionStore::new(cfg.session_file()));
    FakeAuthProvider::from_config(session, cfg)
}

/// Builds a selection from the flags that were given; omitted flags stay inactive.
fn selection<const N: usize>(pairs: [(&str, Option<String>); N]) -> Selection {
    let mut selection = Selection::new();
    for (key, value) in pairs {
        if let Some(value) = value {
            selection.set(key, value);
        }
    }
    selection
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn validate_file(kind: FormKind, path: &Path) -> anyhow::Result<FieldErrors> {
    Ok(match kind {
        FormKind::Appointment => read_json::<AppointmentDraft>(path)?.validate(),
        FormKind::Doctor => read_json::<DoctorDraft>(path)?.validate(),
        FormKind::Patient => read_json::<PatientDraft>(path)?.validate(),
        FormKind::Registration => read_json::<RegistrationDraft>(path)?.validate(),
        FormKind::Login => read_json::<LoginDraft>(path)?.validate(),
    })
}

fn check(errors: FieldErrors) -> anyhow::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    print_errors(&errors);
    anyhow::bail!(errors
        .first_message()
        .unwrap_or("invalid input")
        .to_string())
}

fn print_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("{field}: {message}");
    }
}

fn print_user(user: &User) {
    println!(
        "ID: {}, Name: {}, Email: {}, Since: {}",
        user.id,
        user.display_name,
        user.email,
        user.created_at.format("%Y-%m-%d %H:%M")
    );
}

fn print_record(record: &Record) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

async fn run_remote(
    gateway: &HttpGateway,
    resource: Resource,
    action: RemoteAction,
) -> anyhow::Result<()> {
    match action {
        RemoteAction::List => {
            let records = gateway.list(resource).await?;
            if records.is_empty() {
                println!("No {resource} found.");
            }
            for record in &records {
                print_record(record)?;
            }
        }
        RemoteAction::Get { id } => print_record(&gateway.get(resource, id).await?)?,
        RemoteAction::Delete { id } => {
            gateway.delete(resource, id).await?;
            println!("Deleted {resource} {id}.");
        }
        RemoteAction::Create { file } => {
            let record = match resource {
                Resource::Medicos => gateway.medicos().create(&read_json(&file)?).await?,
                Resource::Pacientes => gateway.pacientes().create(&read_json(&file)?).await?,
                Resource::Citas => gateway.citas().create(&read_json(&file)?).await?,
            };
            print_record(&record)?;
        }
        RemoteAction::Update { id, file } => {
            let record = match resource {
                Resource::Medicos => gateway.medicos().update(id, &read_json(&file)?).await?,
                Resource::Pacientes => gateway.pacientes().update(id, &read_json(&file)?).await?,
                Resource::Citas => gateway.citas().update(id, &read_json(&file)?).await?,
            };
            print_record(&record)?;
        }
    }
    Ok(())
}
