//! 商機看板與儀表板集成測試

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use restock::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn stages() -> Vec<String> {
    vec!["lead".to_string(), "proposal".to_string(), "won".to_string()]
}

/// 每個階段 `per_stage` 張卡片，排序鍵 10, 20, 30...
fn seeded_board(per_stage: usize) -> (StageBoard, Vec<Uuid>) {
    let mut opportunities = Vec::new();
    for stage in stages() {
        for i in 0..per_stage {
            opportunities.push(
                Opportunity::new(Uuid::new_v4(), Some(stage.clone()))
                    .with_sort_order(Decimal::from((i as i64 + 1) * 10)),
            );
        }
    }
    let ids = opportunities.iter().map(|o| o.id).collect();
    (StageBoard::build(&stages(), &opportunities), ids)
}

fn assert_strictly_increasing(board: &StageBoard) {
    for column in board.columns() {
        for pair in column.cards.windows(2) {
            assert!(
                pair[0].sort_key < pair[1].sort_key,
                "欄位 {:?} 排序鍵未嚴格遞增: {} >= {}",
                column.key,
                pair[0].sort_key,
                pair[1].sort_key
            );
        }
    }
}

fn crm_user() -> RoleMap {
    RoleMap::new().with_role(AppArea::Crm, Role::Standard)
}

#[test]
fn test_repeated_insertions_at_same_gap_renumber() {
    let (mut board, ids) = seeded_board(2);
    let target = StageKey::Stage("won".to_string());
    let lead = StageKey::Stage("lead".to_string());
    let roles = crm_user();
    let mut renumbered = false;

    // 反覆把卡片塞進 won 欄位第 1 張之後，排序鍵逐次減半逼近 10
    for round in 0..40 {
        let id = ids[round % 4];
        if board.find_card(id).is_some_and(|(key, _)| key == &target) {
            move_opportunity(&roles, &mut board, id, &lead, 0).unwrap();
        }
        let placement = move_opportunity(&roles, &mut board, id, &target, 1).unwrap();
        assert_eq!(placement.stage, target, "第 {} 次移動", round);
        renumbered |= !placement.renumbered.is_empty();
        assert_strictly_increasing(&board);
    }

    assert!(renumbered);
    let column = board.column(&target).unwrap();
    assert!(column
        .cards
        .iter()
        .all(|card| card.sort_key.scale() <= restock_crm::board::MAX_SORT_KEY_SCALE));
}

#[test]
fn test_move_requires_crm_access() {
    let (mut board, ids) = seeded_board(1);
    let viewer = RoleMap::new().with_role(AppArea::Inventory, Role::Admin);

    let result = move_opportunity(
        &viewer,
        &mut board,
        ids[0],
        &StageKey::Stage("won".to_string()),
        0,
    );

    assert!(matches!(
        result,
        Err(RestockError::AccessDenied { area: AppArea::Crm, .. })
    ));
    // 看板未被修改
    assert_eq!(board.find_card(ids[0]).unwrap().0, &StageKey::Stage("lead".to_string()));
}

#[test]
fn test_move_to_unassigned_column() {
    let (mut board, ids) = seeded_board(1);

    let placement = move_opportunity(&crm_user(), &mut board, ids[1], &StageKey::Unassigned, 0)
        .unwrap();

    assert_eq!(placement.stage.stage_id(), None);
    assert_eq!(board.card_ids(&StageKey::Unassigned), vec![ids[1]]);
    assert!(board.card_ids(&StageKey::Stage("proposal".to_string())).is_empty());
}

#[test]
fn test_dashboard_metrics_through_facade() {
    let roles = crm_user();
    let opportunities = vec![
        OpportunitySnapshot {
            stage: Some("Propuesta".to_string()),
            status: None,
            value: Some(1200.0),
        },
        OpportunitySnapshot {
            stage: Some("Ganado".to_string()),
            status: None,
            value: Some(800.0),
        },
        OpportunitySnapshot {
            stage: Some("Propuesta".to_string()),
            status: Some("perdido".to_string()),
            value: Some(100.0),
        },
    ];
    let today = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
    let activities = vec![
        ActivitySnapshot {
            due_at: Some(Utc.with_ymd_and_hms(2025, 11, 18, 10, 0, 0).unwrap()),
            created_at: None,
        },
        ActivitySnapshot {
            due_at: None,
            created_at: Some(Utc.with_ymd_and_hms(2025, 11, 19, 10, 0, 0).unwrap()),
        },
    ];

    let pipeline = pipeline_for(&roles, &opportunities).unwrap();
    let weekly = activities_for(&roles, &activities, today).unwrap();

    assert_eq!(pipeline.open_deals, 1);
    assert_eq!(pipeline.pipeline_value, 1200.0);
    assert_eq!(pipeline.stages[0].stage, "Propuesta");
    assert_eq!(pipeline.stages[0].count, 2);
    assert_eq!(weekly.activities_this_week, 2);
    assert!(pipeline_for(&RoleMap::new(), &opportunities).is_err());
}

proptest! {
    #[test]
    fn prop_board_keys_stay_ordered_and_unique(
        moves in proptest::collection::vec((0usize..9, 0usize..3, 0usize..5), 1..80)
    ) {
        let (mut board, ids) = seeded_board(3);
        let stage_ids = stages();

        for (card, stage, index) in moves {
            let target = StageKey::Stage(stage_ids[stage].clone());
            let placement = board.move_card(ids[card], &target, index).unwrap();
            prop_assert_eq!(board.find_card(ids[card]).map(|(key, _)| key.clone()), Some(target));
            prop_assert_eq!(board.find_card(ids[card]).map(|(_, c)| c.sort_key), Some(placement.sort_key));

            for column in board.columns() {
                for pair in column.cards.windows(2) {
                    prop_assert!(pair[0].sort_key < pair[1].sort_key);
                }
            }
        }

        let total: usize = board.columns().iter().map(|c| c.cards.len()).sum();
        prop_assert_eq!(total, ids.len());
    }
}
