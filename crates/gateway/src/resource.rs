use std::fmt;

/// A collection exposed by the persistence backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Medicos,
    Pacientes,
    Citas,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Medicos, Resource::Pacientes, Resource::Citas];

    /// Collection path relative to the backend base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Medicos => "/api/medicos",
            Resource::Pacientes => "/hospital/api/pacientes",
            Resource::Citas => "/hospital/api/citas",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Medicos => "medicos",
            Resource::Pacientes => "pacientes",
            Resource::Citas => "citas",
        }
    }

    fn singular_label(self) -> &'static str {
        match self {
            Resource::Medicos => "médico",
            Resource::Pacientes => "paciente",
            Resource::Citas => "cita",
        }
    }

    fn plural_label(self) -> &'static str {
        match self {
            Resource::Medicos => "médicos",
            Resource::Pacientes => "pacientes",
            Resource::Citas => "citas",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| format!("unknown resource '{s}' (expected medicos, pacientes or citas)"))
    }
}

/// What the client was doing when a call failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::List | Operation::Get => "obtener",
            Operation::Create => "crear",
            Operation::Update => "actualizar",
            Operation::Delete => "eliminar",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The banner shown when `operation` on `resource` fails, e.g. "Error al crear médico".
pub fn failure_message(resource: Resource, operation: Operation) -> String {
    let noun = match operation {
        Operation::List => resource.plural_label(),
        _ => resource.singular_label(),
    };
    format!("Error al {} {}", operation.verb(), noun)
}
