use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Area of campus where a post's pickup location sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampusLocation {
    #[serde(rename = "South Campus")]
    South,
    #[serde(rename = "North Campus")]
    North,
    #[serde(rename = "East Campus")]
    East,
    #[serde(rename = "West Campus")]
    West,
}

impl CampusLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampusLocation::South => "South Campus",
            CampusLocation::North => "North Campus",
            CampusLocation::East => "East Campus",
            CampusLocation::West => "West Campus",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "South Campus" => Some(CampusLocation::South),
            "North Campus" => Some(CampusLocation::North),
            "East Campus" => Some(CampusLocation::East),
            "West Campus" => Some(CampusLocation::West),
            _ => None,
        }
    }
}

/// Post entity - a listing of surplus food available for pickup
/// within a time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub location: String,
    pub campus_location: CampusLocation,
    pub description: String,
    /// Absent means "available now".
    pub start_time: Option<DateTime<Utc>>,
    /// When the pickup window closes.
    pub end_time: DateTime<Utc>,
    /// Original supply, set at creation and adjusted only by owner edits.
    pub total_quantity: i32,
    /// Legacy duplicate of `total_quantity`; always written equal to it.
    pub quantity: i32,
    /// Live counter of unreserved units. Invariant: `0 <= quantity_left <= total_quantity`.
    pub quantity_left: i32,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with the full supply still available.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        title: String,
        location: String,
        campus_location: CampusLocation,
        description: String,
        start_time: Option<DateTime<Utc>>,
        end_time: DateTime<Utc>,
        total_quantity: i32,
        image_path: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            location,
            campus_location,
            description,
            start_time,
            end_time,
            total_quantity,
            quantity: total_quantity,
            quantity_left: total_quantity,
            image_path,
            created_at: now,
            updated_at: now,
        }
    }

    /// A post is active while its pickup window is still open.
    /// Derived, never stored.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.end_time > now
    }

    /// Original supply, falling back to the legacy `quantity` column for
    /// rows written before `total_quantity` existed.
    pub fn effective_total(&self) -> i32 {
        if self.total_quantity > 0 {
            self.total_quantity
        } else if self.quantity > 0 {
            self.quantity
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn active_is_derived_from_end_time() {
        let now = Utc::now();
        let post = Post::new(
            Uuid::new_v4(),
            "Leftover bagels".into(),
            "GSU Lobby".into(),
            CampusLocation::East,
            "A dozen assorted".into(),
            None,
            now + TimeDelta::hours(2),
            4,
            None,
        );
        assert!(post.is_active(now));
        assert!(!post.is_active(now + TimeDelta::hours(3)));
    }

    #[test]
    fn effective_total_prefers_total_quantity() {
        let mut post = Post::new(
            Uuid::new_v4(),
            "Pizza".into(),
            "CAS 201".into(),
            CampusLocation::West,
            "Two boxes".into(),
            None,
            Utc::now(),
            5,
            None,
        );
        assert_eq!(post.effective_total(), 5);

        // Legacy row shape: only `quantity` populated.
        post.total_quantity = 0;
        post.quantity = 3;
        assert_eq!(post.effective_total(), 3);
    }

    #[test]
    fn campus_location_round_trips_display_names() {
        for (loc, name) in [
            (CampusLocation::South, "South Campus"),
            (CampusLocation::North, "North Campus"),
            (CampusLocation::East, "East Campus"),
            (CampusLocation::West, "West Campus"),
        ] {
            assert_eq!(CampusLocation::parse(name), Some(loc));
            assert_eq!(loc.as_str(), name);
        }
        assert_eq!(CampusLocation::parse("Central Campus"), None);
    }
}
