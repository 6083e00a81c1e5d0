//! Regulatory registries a compliance item belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Mexican registry or authority that issues the tracked document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Registry {
    /// Registro de Prestadoras de Servicios Especializados.
    Repse,
    /// Sistema de Registro de Obras de Construcción.
    Siroc,
    Imss,
    Stps,
    Sat,
}

impl Registry {
    /// All registries in display order.
    pub const ALL: [Registry; 5] = [
        Registry::Repse,
        Registry::Siroc,
        Registry::Imss,
        Registry::Stps,
        Registry::Sat,
    ];

    /// Code used as the warning window key.
    pub fn code(&self) -> &'static str {
        match self {
            Registry::Repse => "REPSE",
            Registry::Siroc => "SIROC",
            Registry::Imss => "IMSS",
            Registry::Stps => "STPS",
            Registry::Sat => "SAT",
        }
    }

    /// Human readable authority name.
    pub fn authority(&self) -> &'static str {
        match self {
            Registry::Repse => "Padrón de servicios especializados",
            Registry::Siroc => "Registro de obras de construcción",
            Registry::Imss => "Instituto Mexicano del Seguro Social",
            Registry::Stps => "Secretaría del Trabajo y Previsión Social",
            Registry::Sat => "Servicio de Administración Tributaria",
        }
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Registry {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Registry::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::unknown_value("registry", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("repse".parse::<Registry>().unwrap(), Registry::Repse);
        assert_eq!(" SAT ".parse::<Registry>().unwrap(), Registry::Sat);
        assert!("INFONAVIT".parse::<Registry>().is_err());
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Registry::Siroc).unwrap(), "\"SIROC\"");
        let parsed: Registry = serde_json::from_str("\"STPS\"").unwrap();
        assert_eq!(parsed, Registry::Stps);
    }

    #[test]
    fn display_is_code() {
        for registry in Registry::ALL {
            assert_eq!(registry.to_string(), registry.code());
        }
    }
}
