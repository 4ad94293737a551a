use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A work shift as shown in the filing form and report listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Shift {
    /// Shift number used in report records
    pub id: i64,
    /// Display name
    pub name: String,
    /// Hours the shift covers
    pub hours: String,
}

/// The three shifts of the working day, in rotation order
pub fn catalog() -> Vec<Shift> {
    vec![
        Shift {
            id: 1,
            name: shift_name(1),
            hours: "06:00 - 14:20".to_string(),
        },
        Shift {
            id: 2,
            name: shift_name(2),
            hours: "14:20 - 22:00".to_string(),
        },
        Shift {
            id: 3,
            name: shift_name(3),
            hours: "22:00 - 06:00".to_string(),
        },
    ]
}

/// Display name for a shift number
pub fn shift_name(id: i64) -> String {
    format!("Shift {}", id)
}
