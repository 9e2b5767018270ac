//! Attendee entity - one accepted workshop registration

use serde::{Deserialize, Serialize};

/// Domain recorded for attendees who did not leave an email address
pub const NO_DOMAIN: &str = "sin-dominio";

/// Workshop slot an attendee signs up for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    #[serde(rename = "mañana")]
    Morning,
    #[serde(rename = "tarde")]
    Afternoon,
}

impl Modality {
    /// Every slot the workshop knows about, in display order
    pub const ALL: [Modality; 2] = [Modality::Morning, Modality::Afternoon];

    /// Label shown to the operator and matched against their input
    pub fn label(&self) -> &'static str {
        match self {
            Modality::Morning => "mañana",
            Modality::Afternoon => "tarde",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mañana" => Ok(Modality::Morning),
            "tarde" => Ok(Modality::Afternoon),
            other => Err(format!("Invalid modality: {}. Use mañana or tarde", other)),
        }
    }
}

/// A registered attendee
///
/// Records are built once by the registration session and never mutated;
/// fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendeeRecord {
    name: String,
    age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    domain: String,
    modality: Modality,
    price: f64,
}

impl AttendeeRecord {
    /// Build a record, deriving the email domain
    ///
    /// The name is stored trimmed. A blank email is stored as no email.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        email: Option<String>,
        modality: Modality,
        price: f64,
    ) -> Self {
        let email = email.filter(|e| !e.trim().is_empty());
        let domain = email_domain(email.as_deref());
        Self {
            name: name.into().trim().to_string(),
            age,
            email,
            domain,
            modality,
            price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Whether the attendee is under 18
    pub fn is_minor(&self) -> bool {
        self.age < 18
    }

    /// First character of the name, `?` if there is none
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// Domain part of an email address
///
/// Everything after the first `@`. An address without `@` is kept whole,
/// and a missing or empty domain falls back to [`NO_DOMAIN`].
pub fn email_domain(email: Option<&str>) -> String {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return NO_DOMAIN.to_string();
    };

    let domain = match email.split_once('@') {
        Some((_, after)) => after,
        None => email,
    };

    if domain.is_empty() {
        NO_DOMAIN.to_string()
    } else {
        domain.to_string()
    }
}
