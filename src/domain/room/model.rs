//! Room domain entity

/// A bookable meeting room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: i32,
    pub name: String,
    /// Number of seats
    pub capacity: i32,
    /// Free-text equipment list ("Projecteur, Tableau blanc")
    pub equipment: String,
}

/// Room about to be provisioned; the id comes from storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub name: String,
    pub capacity: i32,
    pub equipment: String,
}

impl NewRoom {
    pub fn new(name: impl Into<String>, capacity: i32, equipment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity,
            equipment: equipment.into(),
        }
    }

    pub fn into_room(self, id: i32) -> Room {
        Room {
            id,
            name: self.name,
            capacity: self.capacity,
            equipment: self.equipment,
        }
    }
}

/// Rooms provisioned on first start when the table is empty.
pub fn default_rooms() -> Vec<NewRoom> {
    vec![
        NewRoom::new("Salle A", 10, "Projecteur, Tableau blanc"),
        NewRoom::new("Salle B", 20, "Écran TV, Système de visioconférence"),
        NewRoom::new("Salle C", 30, "Projecteur, Système audio"),
        NewRoom::new("Salle D", 15, "Tableau blanc, Wifi haute vitesse"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rooms_are_valid() {
        let rooms = default_rooms();
        assert_eq!(rooms.len(), 4);
        assert!(rooms.iter().all(|r| !r.name.is_empty() && r.capacity > 0));
    }

    #[test]
    fn into_room_keeps_fields() {
        let room = NewRoom::new("Salle Z", 4, "Wifi").into_room(9);
        assert_eq!(room.id, 9);
        assert_eq!(room.name, "Salle Z");
        assert_eq!(room.capacity, 4);
    }
}
