//! Todo entity model and DTOs.
//!
//! JSON field names are PascalCase (`ID`, `Name`, `IsComplete`, ...). The
//! DTOs also accept the lower-case and snake_case spellings older clients
//! send.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::error::CoreError;
use todo_core::types::{DbId, Timestamp};

/// A todo row from the `todos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Todo {
    #[serde(rename = "ID")]
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// `None` means the completion state has never been set.
    pub is_complete: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Set when the row is soft-deleted. Always `None` on rows returned by reads.
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a todo.
///
/// A client-supplied `ID` is honoured: the row is written under that id,
/// replacing any existing row with the same id. Negative ids fail to
/// decode; ids beyond BIGSERIAL range fail [`CreateTodo::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTodo {
    #[serde(rename = "ID", alias = "Id", alias = "id")]
    pub id: Option<u64>,
    #[serde(default, alias = "name")]
    pub name: String,
    #[serde(default, alias = "description")]
    pub description: String,
    #[serde(alias = "is_complete", alias = "Is_complete")]
    pub is_complete: Option<bool>,
}

impl CreateTodo {
    /// Reject a client-supplied id that does not fit a [`DbId`].
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.id {
            Some(id) if DbId::try_from(id).is_err() => Err(CoreError::Validation(format!(
                "id {id} is out of range"
            ))),
            _ => Ok(()),
        }
    }

    /// The client-supplied id, if any. Zero counts as "not supplied".
    pub fn explicit_id(&self) -> Option<DbId> {
        self.id
            .filter(|id| *id > 0)
            .and_then(|id| DbId::try_from(id).ok())
    }
}

/// DTO for updating an existing todo. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTodo {
    #[serde(alias = "name")]
    pub name: Option<String>,
    #[serde(alias = "description")]
    pub description: Option<String>,
    #[serde(alias = "is_complete", alias = "Is_complete")]
    pub is_complete: Option<bool>,
}

impl UpdateTodo {
    /// Drop zero-valued fields so they leave the stored value untouched.
    ///
    /// Empty strings are treated as absent. `IsComplete: false` is a real
    /// value and is kept.
    pub fn non_zero(self) -> Self {
        Self {
            name: self.name.filter(|s| !s.is_empty()),
            description: self.description.filter(|s| !s.is_empty()),
            is_complete: self.is_complete,
        }
    }

    /// `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_complete.is_none()
    }

    /// Overwrite the present fields of `todo` in place.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(name) = &self.name {
            todo.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            todo.description.clone_from(description);
        }
        if let Some(is_complete) = self.is_complete {
            todo.is_complete = Some(is_complete);
        }
    }
}
