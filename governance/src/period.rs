//! Periods and assignments, as far as edit proposals need them.
//!
//! Periods form a chain linked by `next` edges. An assignment is any document
//! with an incoming `assignment` edge and runs for `period_count` periods from
//! its `start_period`.

use docgov_types::{ContentGroupsExt, DocHash, Document, Timestamp};

use crate::graph::DocumentGraph;
use crate::labels;
use crate::GovernanceError;

pub struct Period {
    doc: Document,
}

impl Period {
    pub fn load(graph: &DocumentGraph<'_>, hash: &DocHash) -> Result<Self, GovernanceError> {
        let doc = graph
            .get_document(hash)?
            .ok_or(GovernanceError::PeriodNotFound(*hash))?;
        Ok(Self { doc })
    }

    pub fn hash(&self) -> DocHash {
        self.doc.hash()
    }

    pub fn start_time(&self) -> Result<Timestamp, GovernanceError> {
        Ok(self.doc.groups().get_as(labels::DETAILS, labels::START_TIME)?)
    }

    /// The period `n` steps down the `next` chain; `n = 0` is this period.
    pub fn nth_after(self, graph: &DocumentGraph<'_>, n: u64) -> Result<Self, GovernanceError> {
        let mut current = self;
        for _ in 0..n {
            let edge = graph
                .first_edge_from(&current.hash(), labels::NEXT)?
                .ok_or(GovernanceError::PeriodNotFound(current.hash()))?;
            current = Self::load(graph, &edge.to)?;
        }
        Ok(current)
    }
}

pub struct Assignment {
    doc: Document,
}

impl Assignment {
    /// Load `hash` as an assignment, or `None` if nothing assigns it.
    pub fn load_if_assignment(
        graph: &DocumentGraph<'_>,
        hash: &DocHash,
    ) -> Result<Option<Self>, GovernanceError> {
        if graph.edges_to(hash, labels::ASSIGNMENT)?.is_empty() {
            return Ok(None);
        }
        let doc = graph
            .get_document(hash)?
            .ok_or(GovernanceError::OriginalNotFound(*hash))?;
        Ok(Some(Self { doc }))
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn period_count(&self) -> Result<i64, GovernanceError> {
        Ok(self.doc.groups().get_as(labels::DETAILS, labels::PERIOD_COUNT)?)
    }

    pub fn start_period(&self) -> Result<DocHash, GovernanceError> {
        Ok(self.doc.groups().get_as(labels::DETAILS, labels::START_PERIOD)?)
    }

    /// Start of the assignment's final period.
    pub fn last_period_start(&self, graph: &DocumentGraph<'_>) -> Result<Timestamp, GovernanceError> {
        let count = self.period_count()?;
        if count < 1 {
            return Err(GovernanceError::InvalidPeriodCount {
                current: count,
                proposed: count,
            });
        }
        Period::load(graph, &self.start_period()?)?
            .nth_after(graph, (count - 1) as u64)?
            .start_time()
    }

    /// Check that an extension to `proposed` periods may be voted on at `now`.
    ///
    /// `proposed`, when given, must exceed the current count, and the current
    /// final period must not have started yet.
    pub fn check_extension(
        &self,
        graph: &DocumentGraph<'_>,
        proposed: Option<i64>,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let current = self.period_count()?;
        if let Some(proposed) = proposed {
            if proposed <= current {
                return Err(GovernanceError::InvalidPeriodCount { current, proposed });
            }
        }
        if self.last_period_start(graph)? <= now {
            return Err(GovernanceError::InsufficientRemainingPeriods);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgov_nullables::NullGraphStore;
    use docgov_types::{AccountName, ContentGroup, Edge};

    const WEEK: u64 = 7 * 86_400;

    /// Seed `n` weekly periods starting at `start` and an assignment over the first `count`.
    fn seed(store: &NullGraphStore, start: u64, n: usize, count: i64) -> (Vec<DocHash>, DocHash) {
        let dao = AccountName::new("dao");
        let mut periods = Vec::new();
        for i in 0..n {
            let doc = Document::new(
                dao.clone(),
                Timestamp::EPOCH,
                vec![ContentGroup::new(labels::DETAILS)
                    .with(labels::START_TIME, Timestamp::new(start + i as u64 * WEEK))],
            )
            .unwrap();
            periods.push(doc.hash());
            store.insert_document(doc);
        }
        for pair in periods.windows(2) {
            store.insert_edge(Edge::new(pair[0], pair[1], labels::NEXT, dao.clone(), Timestamp::EPOCH));
        }
        let assignment = Document::new(
            AccountName::new("alice"),
            Timestamp::EPOCH,
            vec![ContentGroup::new(labels::DETAILS)
                .with(labels::START_PERIOD, periods[0])
                .with(labels::PERIOD_COUNT, count)],
        )
        .unwrap();
        let hash = assignment.hash();
        store.insert_document(assignment);
        store.insert_edge(Edge::new(
            DocHash::new([1; 32]),
            hash,
            labels::ASSIGNMENT,
            dao,
            Timestamp::EPOCH,
        ));
        (periods, hash)
    }

    #[test]
    fn walks_the_next_chain() {
        let store = NullGraphStore::new();
        let (periods, _) = seed(&store, 1_000, 4, 2);
        let graph = DocumentGraph::new(&store);
        let third = Period::load(&graph, &periods[0]).unwrap().nth_after(&graph, 2).unwrap();
        assert_eq!(third.hash(), periods[2]);
        assert_eq!(third.start_time().unwrap(), Timestamp::new(1_000 + 2 * WEEK));
        assert!(matches!(
            Period::load(&graph, &periods[0]).unwrap().nth_after(&graph, 4),
            Err(GovernanceError::PeriodNotFound(_))
        ));
    }

    #[test]
    fn only_assigned_documents_are_assignments() {
        let store = NullGraphStore::new();
        let (periods, assignment) = seed(&store, 1_000, 2, 2);
        let graph = DocumentGraph::new(&store);
        assert!(Assignment::load_if_assignment(&graph, &assignment).unwrap().is_some());
        assert!(Assignment::load_if_assignment(&graph, &periods[0]).unwrap().is_none());
    }

    #[test]
    fn extension_must_grow_the_count() {
        let store = NullGraphStore::new();
        let (_, hash) = seed(&store, 1_000, 6, 3);
        let graph = DocumentGraph::new(&store);
        let assignment = Assignment::load_if_assignment(&graph, &hash).unwrap().unwrap();
        let now = Timestamp::new(1_000);

        assert!(matches!(
            assignment.check_extension(&graph, Some(3), now),
            Err(GovernanceError::InvalidPeriodCount { current: 3, proposed: 3 })
        ));
        assert!(assignment.check_extension(&graph, Some(4), now).is_ok());
        assert!(assignment.check_extension(&graph, None, now).is_ok());
    }

    #[test]
    fn final_period_must_still_be_ahead() {
        let store = NullGraphStore::new();
        let (_, hash) = seed(&store, 1_000, 6, 3);
        let graph = DocumentGraph::new(&store);
        let assignment = Assignment::load_if_assignment(&graph, &hash).unwrap().unwrap();
        let last_start = Timestamp::new(1_000 + 2 * WEEK);

        assert_eq!(assignment.last_period_start(&graph).unwrap(), last_start);
        assert!(assignment
            .check_extension(&graph, Some(5), Timestamp::new(last_start.as_secs() - 1))
            .is_ok());
        assert!(matches!(
            assignment.check_extension(&graph, Some(5), last_start),
            Err(GovernanceError::InsufficientRemainingPeriods)
        ));
    }
}
