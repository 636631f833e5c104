//! Audit log of notable world occurrences.

use ameba_core::{FoodId, OrganismId};
use ameba_genome::Dna;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// `parent` is absent for organisms created by an external spawn
    Birth {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<OrganismId>,
        child: OrganismId,
    },
    Death {
        organism: OrganismId,
    },
    FoodConsumed {
        organism: OrganismId,
        food: FoodId,
    },
    Mutation {
        organism: OrganismId,
        dna: Dna,
    },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Birth { .. } => "birth",
            EventKind::Death { .. } => "death",
            EventKind::FoodConsumed { .. } => "food_consumed",
            EventKind::Mutation { .. } => "mutation",
        }
    }
}

/// A recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Position in the log since startup, never reused
    pub seq: u64,
    pub tick: u64,
    #[serde(flatten)]
    pub kind: EventKind,
    /// Unix time in nanoseconds
    pub at: i64,
}

/// Ordered event log, bounded when `capacity > 0`.
///
/// When full, the oldest event is evicted on every append.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<Event>,
    capacity: usize,
    next_seq: u64,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
            next_seq: 0,
        }
    }

    pub fn record(&mut self, tick: u64, kind: EventKind) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        if self.capacity > 0 && self.events.len() == self.capacity {
            self.events.pop_front();
        }

        self.events.push_back(Event {
            seq,
            tick,
            kind,
            at: chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        });
        seq
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded since startup, evicted ones included
    pub fn total_recorded(&self) -> u64 {
        self.next_seq
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter()
    }

    /// Events with `seq >= since`, oldest first, at most `limit` of them
    pub fn since(&self, since: u64, limit: Option<usize>) -> Vec<Event> {
        // seq is contiguous within the retained window
        let first = self.events.front().map(|e| e.seq).unwrap_or(self.next_seq);
        let skip = since.saturating_sub(first) as usize;

        self.events
            .iter()
            .skip(skip)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn death() -> EventKind {
        EventKind::Death {
            organism: OrganismId::new(),
        }
    }

    #[test]
    fn test_sequence_numbers() {
        let mut log = EventLog::new(0);
        assert_eq!(log.record(1, death()), 0);
        assert_eq!(log.record(1, death()), 1);
        assert_eq!(log.record(2, death()), 2);
        assert_eq!(log.len(), 3);
        assert_eq!(log.total_recorded(), 3);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = EventLog::new(3);
        for tick in 0..5 {
            log.record(tick, death());
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.total_recorded(), 5);
        let seqs: Vec<u64> = log.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![2, 3, 4]);
    }

    #[test]
    fn test_since_and_limit() {
        let mut log = EventLog::new(4);
        for tick in 0..6 {
            log.record(tick, death());
        }

        // Retained window is 2..=5
        let seqs = |events: Vec<Event>| events.iter().map(|e| e.seq).collect::<Vec<_>>();
        assert_eq!(seqs(log.since(0, None)), vec![2, 3, 4, 5]);
        assert_eq!(seqs(log.since(4, None)), vec![4, 5]);
        assert_eq!(seqs(log.since(3, Some(1))), vec![3]);
        assert!(log.since(6, None).is_empty());
        assert!(log.since(100, None).is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let mut log = EventLog::new(0);
        let child = OrganismId::new();
        log.record(7, EventKind::Birth { parent: None, child: child.clone() });

        let json = serde_json::to_value(log.iter().next().unwrap()).unwrap();
        assert_eq!(json["type"], "birth");
        assert_eq!(json["child"], child.as_str());
        assert_eq!(json["tick"], 7);
        assert!(json.get("parent").is_none());
        assert!(json["at"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_food_consumed_name() {
        let kind = EventKind::FoodConsumed {
            organism: OrganismId::new(),
            food: FoodId::new(),
        };
        assert_eq!(kind.name(), "food_consumed");
        assert_eq!(serde_json::to_value(&kind).unwrap()["type"], "food_consumed");
    }
}
