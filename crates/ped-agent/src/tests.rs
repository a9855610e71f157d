//! Unit tests for ped-agent.

#[cfg(test)]
mod builder {
    use ped_core::{AgentId, GroupId, PedError, Point2};

    use crate::{AgentStoreBuilder, Destination};

    #[test]
    fn defaults() {
        let store = AgentStoreBuilder::new(4).build().unwrap();
        assert_eq!(store.count, 4);
        assert_eq!(store.position.len(), 4);
        assert_eq!(store.destination[0], Destination::None);
        assert!(!store.needs_destination[3]);
        assert!(store.groups().is_empty());
        assert_eq!(store.group_of(AgentId(2)), None);
    }

    #[test]
    fn positions_and_destinations_applied() {
        let store = AgentStoreBuilder::new(2)
            .position(AgentId(1), Point2::new(3.0, 4.0))
            .destination(AgentId(1), Destination::Queue)
            .build()
            .unwrap();
        assert_eq!(store.position_of(AgentId(1)), Some(Point2::new(3.0, 4.0)));
        assert_eq!(store.destination[1], Destination::Queue);
    }

    #[test]
    fn out_of_range_agent_errors() {
        let result = AgentStoreBuilder::new(2)
            .position(AgentId(5), Point2::new(0.0, 0.0))
            .build();
        assert!(matches!(result, Err(PedError::AgentNotFound(AgentId(5)))));
    }

    #[test]
    fn empty_store() {
        let store = AgentStoreBuilder::new(0).build().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.agent_ids().count(), 0);
        assert_eq!(store.position_of(AgentId(0)), None);
    }

    #[test]
    fn groups_applied() {
        let store = AgentStoreBuilder::new(4)
            .group(GroupId(7), &[AgentId(3), AgentId(1)])
            .build()
            .unwrap();
        assert_eq!(store.group_of(AgentId(1)), Some(GroupId(7)));
        // Members come back sorted regardless of insertion order.
        assert_eq!(store.members(GroupId(7)), &[AgentId(1), AgentId(3)]);
    }
}

#[cfg(test)]
mod groups {
    use ped_core::{AgentId, GroupId, PedError};

    use crate::AgentStoreBuilder;

    #[test]
    fn join_moves_between_groups() {
        let mut store = AgentStoreBuilder::new(3)
            .group(GroupId(0), &[AgentId(0), AgentId(1)])
            .build()
            .unwrap();
        store.join_group(AgentId(1), GroupId(1)).unwrap();
        assert_eq!(store.members(GroupId(0)), &[AgentId(0)]);
        assert_eq!(store.members(GroupId(1)), &[AgentId(1)]);
        assert_eq!(store.group_of(AgentId(1)), Some(GroupId(1)));
    }

    #[test]
    fn leaving_last_member_drops_group() {
        let mut store = AgentStoreBuilder::new(1)
            .group(GroupId(0), &[AgentId(0)])
            .build()
            .unwrap();
        store.leave_group(AgentId(0)).unwrap();
        assert!(store.groups().is_empty());
        assert!(store.members(GroupId(0)).is_empty());
        // Leaving again is harmless.
        store.leave_group(AgentId(0)).unwrap();
    }

    #[test]
    fn join_is_idempotent() {
        let mut store = AgentStoreBuilder::new(2).build().unwrap();
        store.join_group(AgentId(0), GroupId(2)).unwrap();
        store.join_group(AgentId(0), GroupId(2)).unwrap();
        assert_eq!(store.members(GroupId(2)), &[AgentId(0)]);
    }

    #[test]
    fn invalid_inputs_error() {
        let mut store = AgentStoreBuilder::new(1).build().unwrap();
        assert!(matches!(
            store.join_group(AgentId(9), GroupId(0)),
            Err(PedError::AgentNotFound(_))
        ));
        assert!(matches!(
            store.join_group(AgentId(0), GroupId::INVALID),
            Err(PedError::GroupNotFound(_))
        ));
    }

    #[test]
    fn iter_in_group_order() {
        let store = AgentStoreBuilder::new(4)
            .group(GroupId(5), &[AgentId(0)])
            .group(GroupId(2), &[AgentId(1), AgentId(2)])
            .build()
            .unwrap();
        let ids: Vec<GroupId> = store.groups().iter().map(|(g, _)| g).collect();
        assert_eq!(ids, vec![GroupId(2), GroupId(5)]);
    }
}
