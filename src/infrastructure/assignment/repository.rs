//! Storage-backed assignment repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::assignment::{
    AssignmentId, AssignmentQuery, AssignmentRepository, BallCollectorAssignment,
};
use crate::domain::member::MemberId;
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of AssignmentRepository
#[derive(Debug)]
pub struct StorageAssignmentRepository {
    storage: Arc<dyn Storage<BallCollectorAssignment>>,
}

impl StorageAssignmentRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<BallCollectorAssignment>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl AssignmentRepository for StorageAssignmentRepository {
    async fn get(&self, id: &AssignmentId) -> Result<Option<BallCollectorAssignment>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(
        &self,
        assignment: BallCollectorAssignment,
    ) -> Result<BallCollectorAssignment, DomainError> {
        if self.storage.exists(assignment.id()).await? {
            return Err(DomainError::conflict(format!(
                "Assignment '{}' already exists",
                assignment.id()
            )));
        }

        self.storage.create(assignment).await
    }

    async fn update(
        &self,
        assignment: BallCollectorAssignment,
    ) -> Result<BallCollectorAssignment, DomainError> {
        if !self.storage.exists(assignment.id()).await? {
            return Err(DomainError::not_found(format!(
                "Assignment '{}' not found",
                assignment.id()
            )));
        }

        self.storage.update(assignment).await
    }

    async fn delete(&self, id: &AssignmentId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list(
        &self,
        query: &AssignmentQuery,
    ) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        let all = self.storage.list().await?;
        let mut result: Vec<BallCollectorAssignment> =
            filter_assignments(all.iter(), query).cloned().collect();

        // Sort by date, oldest first
        result.sort_by_key(|a| a.assignment_date());

        // Apply pagination
        let offset = query.offset.unwrap_or(0);

        if offset < result.len() {
            result = result.into_iter().skip(offset).collect();
        } else {
            result.clear();
        }

        if let Some(limit) = query.limit {
            result.truncate(limit);
        }

        Ok(result)
    }

    async fn count(&self, query: &AssignmentQuery) -> Result<usize, DomainError> {
        let all = self.storage.list().await?;
        Ok(filter_assignments(all.iter(), query).count())
    }

    async fn find_for_member_on(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> Result<Option<BallCollectorAssignment>, DomainError> {
        let all = self.storage.list().await?;
        Ok(all
            .into_iter()
            .find(|a| a.member_id() == member_id && a.assignment_date() == date))
    }
}

fn filter_assignments<'a>(
    assignments: impl Iterator<Item = &'a BallCollectorAssignment>,
    query: &AssignmentQuery,
) -> impl Iterator<Item = &'a BallCollectorAssignment> {
    let member_id = query.member_id.clone();
    let from = query.from;
    let until = query.until;

    assignments.filter(move |assignment| {
        if let Some(ref member_id) = member_id {
            if assignment.member_id() != member_id {
                return false;
            }
        }

        if let Some(from) = from {
            if assignment.assignment_date() < from {
                return false;
            }
        }

        if let Some(until) = until {
            if assignment.assignment_date() >= until {
                return false;
            }
        }

        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageAssignmentRepository {
        let storage = Arc::new(InMemoryStorage::<BallCollectorAssignment>::new());
        StorageAssignmentRepository::new(storage)
    }

    fn assignment(member_id: &MemberId, y: i32, m: u32, d: u32) -> BallCollectorAssignment {
        BallCollectorAssignment::new(
            AssignmentId::generate(),
            member_id.clone(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = create_repo();
        let member = MemberId::generate();
        let created = repo.create(assignment(&member, 2026, 8, 10)).await.unwrap();

        let fetched = repo.get(created.id()).await.unwrap();
        assert_eq!(fetched.unwrap().member_id(), &member);
    }

    #[tokio::test]
    async fn test_list_window_and_member_filter() {
        let repo = create_repo();
        let alice = MemberId::generate();
        let bob = MemberId::generate();

        repo.create(assignment(&alice, 2026, 8, 3)).await.unwrap();
        repo.create(assignment(&alice, 2026, 8, 10)).await.unwrap();
        repo.create(assignment(&bob, 2026, 8, 10)).await.unwrap();

        let window = AssignmentQuery::new()
            .with_from(NaiveDate::from_ymd_opt(2026, 8, 9).unwrap())
            .with_until(NaiveDate::from_ymd_opt(2026, 8, 16).unwrap());
        assert_eq!(repo.list(&window).await.unwrap().len(), 2);

        let alice_only = AssignmentQuery::new().with_member(alice.clone());
        assert_eq!(repo.list(&alice_only).await.unwrap().len(), 2);
        assert_eq!(repo.count(&alice_only).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_sorted_by_date() {
        let repo = create_repo();
        let member = MemberId::generate();

        repo.create(assignment(&member, 2026, 8, 17)).await.unwrap();
        repo.create(assignment(&member, 2026, 8, 3)).await.unwrap();
        repo.create(assignment(&member, 2026, 8, 10)).await.unwrap();

        let all = repo.list(&AssignmentQuery::new()).await.unwrap();
        let dates: Vec<NaiveDate> = all.iter().map(|a| a.assignment_date()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn test_find_for_member_on() {
        let repo = create_repo();
        let member = MemberId::generate();

        repo.create(assignment(&member, 2026, 8, 10)).await.unwrap();

        let hit = repo
            .find_for_member_on(&member, NaiveDate::from_ymd_opt(2026, 8, 10).unwrap())
            .await
            .unwrap();
        assert!(hit.is_some());

        let miss = repo
            .find_for_member_on(&member, NaiveDate::from_ymd_opt(2026, 8, 11).unwrap())
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = create_repo();
        let member = MemberId::generate();
        let created = repo.create(assignment(&member, 2026, 8, 10)).await.unwrap();
        let id = created.id().clone();

        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
    }
}
