//! First-start provisioning

use tracing::info;

use crate::domain::room::model::default_rooms;
use crate::domain::{DomainResult, RoomRepository};

/// Insert the default rooms when the rooms table is empty.
///
/// Returns how many rooms were created (0 when rooms already exist).
pub async fn seed_default_rooms(rooms: &dyn RoomRepository) -> DomainResult<usize> {
    if rooms.count().await? > 0 {
        return Ok(0);
    }

    let defaults = default_rooms();
    let n = defaults.len();
    for room in defaults {
        rooms.insert(room).await?;
    }
    info!(count = n, "Seeded default rooms");
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryRoomRepository;

    #[tokio::test]
    async fn seeds_once() {
        let repo = InMemoryRoomRepository::new();
        assert_eq!(seed_default_rooms(&repo).await.unwrap(), 4);
        assert_eq!(seed_default_rooms(&repo).await.unwrap(), 0);

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Salle A", "Salle B", "Salle C", "Salle D"]);
    }
}
