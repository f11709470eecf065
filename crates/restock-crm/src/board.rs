//! 商機看板排序
//!
//! 每個階段欄位內的卡片以排序鍵遞增排列。拖放時新排序鍵取前後卡片的中點，
//! 中點無法嚴格落在兩者之間（或小數位數超過 [`MAX_SORT_KEY_SCALE`]）時，
//! 整個欄位重新編號為 [`RENUMBER_STEP`] 的倍數。

use chrono::{DateTime, Utc};
use restock_core::RestockError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// 排序鍵允許的最大小數位數
pub const MAX_SORT_KEY_SCALE: u32 = 12;

/// 重新編號的間距
pub const RENUMBER_STEP: i64 = 1000;

/// 欄位鍵
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKey {
    /// 指定階段
    Stage(String),
    /// 未指定階段
    Unassigned,
}

impl StageKey {
    pub fn from_stage_id(stage_id: Option<&str>) -> Self {
        match stage_id {
            Some(id) if !id.trim().is_empty() => StageKey::Stage(id.to_string()),
            _ => StageKey::Unassigned,
        }
    }

    /// 寫回資料庫的階段 ID
    pub fn stage_id(&self) -> Option<&str> {
        match self {
            StageKey::Stage(id) => Some(id),
            StageKey::Unassigned => None,
        }
    }
}

/// 商機（看板所需欄位）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: Uuid,
    pub stage_id: Option<String>,
    pub sort_order: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Opportunity {
    pub fn new(id: Uuid, stage_id: Option<String>) -> Self {
        Self {
            id,
            stage_id,
            sort_order: None,
            created_at: None,
        }
    }

    /// 建構器模式：設置排序鍵
    pub fn with_sort_order(mut self, sort_order: Decimal) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// 建構器模式：設置建立時間
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// 有效排序鍵：排序鍵，其次建立時間（毫秒），都沒有時為 0
    pub fn effective_sort_key(&self) -> Decimal {
        self.sort_order
            .or_else(|| self.created_at.map(|t| Decimal::from(t.timestamp_millis())))
            .unwrap_or(Decimal::ZERO)
    }
}

/// 看板卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCard {
    pub id: Uuid,
    pub sort_key: Decimal,
    pub created_at: Option<DateTime<Utc>>,
}

/// 看板欄位
#[derive(Debug, Clone)]
pub struct Column {
    pub key: StageKey,
    pub cards: Vec<BoardCard>,
}

/// 拖放結果（呼叫方需持久化的變更）
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub card_id: Uuid,
    pub stage: StageKey,
    pub sort_key: Decimal,
    /// 因重新編號而改變排序鍵的其他卡片
    pub renumbered: Vec<(Uuid, Decimal)>,
}

/// 階段看板
#[derive(Debug, Clone, Default)]
pub struct StageBoard {
    columns: Vec<Column>,
}

impl StageBoard {
    /// 建立看板：先依階段順序建立欄位，再放入商機
    ///
    /// 商機的階段不在清單中時自動新增欄位。
    pub fn build(stage_ids: &[String], opportunities: &[Opportunity]) -> Self {
        let mut board = Self {
            columns: stage_ids
                .iter()
                .map(|id| Column {
                    key: StageKey::Stage(id.clone()),
                    cards: Vec::new(),
                })
                .collect(),
        };

        for opportunity in opportunities {
            let key = StageKey::from_stage_id(opportunity.stage_id.as_deref());
            board.column_mut_or_insert(&key).cards.push(BoardCard {
                id: opportunity.id,
                sort_key: opportunity.effective_sort_key(),
                created_at: opportunity.created_at,
            });
        }

        for column in &mut board.columns {
            column.cards.sort_by(compare_cards);
        }
        board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &StageKey) -> Option<&Column> {
        self.columns.iter().find(|c| &c.key == key)
    }

    /// 欄位內卡片 ID（依顯示順序）
    pub fn card_ids(&self, key: &StageKey) -> Vec<Uuid> {
        self.column(key)
            .map(|c| c.cards.iter().map(|card| card.id).collect())
            .unwrap_or_default()
    }

    /// 卡片所在的欄位
    pub fn find_card(&self, card_id: Uuid) -> Option<(&StageKey, &BoardCard)> {
        self.columns.iter().find_map(|column| {
            column
                .cards
                .iter()
                .find(|card| card.id == card_id)
                .map(|card| (&column.key, card))
        })
    }

    /// 移動卡片到目標欄位的 `index` 位置
    ///
    /// `index` 是卡片移出後目標欄位中的位置，超出範圍時放到最後。
    pub fn move_card(
        &mut self,
        card_id: Uuid,
        target: &StageKey,
        index: usize,
    ) -> restock_core::Result<Placement> {
        let mut card = self
            .remove_card(card_id)
            .ok_or_else(|| RestockError::UnknownCard(card_id.to_string()))?;

        let column = self.column_mut_or_insert(target);
        let index = index.min(column.cards.len());
        let prev = index.checked_sub(1).map(|i| column.cards[i].sort_key);
        let next = column.cards.get(index).map(|c| c.sort_key);

        let mut renumbered = Vec::new();
        match key_between(prev, next) {
            Some(key) => {
                card.sort_key = key;
                column.cards.insert(index, card);
            }
            None => {
                tracing::debug!("欄位 {:?} 排序鍵耗盡，重新編號", target);
                column.cards.insert(index, card);
                renumbered = renumber(&mut column.cards);
                renumbered.retain(|(id, _)| *id != card_id);
            }
        }

        let sort_key = column.cards[index].sort_key;
        Ok(Placement {
            card_id,
            stage: target.clone(),
            sort_key,
            renumbered,
        })
    }

    fn remove_card(&mut self, card_id: Uuid) -> Option<BoardCard> {
        self.columns.iter_mut().find_map(|column| {
            let position = column.cards.iter().position(|c| c.id == card_id)?;
            Some(column.cards.remove(position))
        })
    }

    fn column_mut_or_insert(&mut self, key: &StageKey) -> &mut Column {
        let position = match self.columns.iter().position(|c| &c.key == key) {
            Some(position) => position,
            None => {
                self.columns.push(Column {
                    key: key.clone(),
                    cards: Vec::new(),
                });
                self.columns.len() - 1
            }
        };
        &mut self.columns[position]
    }
}

/// 排序鍵遞增，相同時建立時間較新者在前
fn compare_cards(a: &BoardCard, b: &BoardCard) -> Ordering {
    a.sort_key
        .cmp(&b.sort_key)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// 計算兩個鄰居之間的排序鍵，無法嚴格落在中間時返回 `None`
pub fn key_between(prev: Option<Decimal>, next: Option<Decimal>) -> Option<Decimal> {
    let key = match (prev, next) {
        (Some(prev), Some(next)) => {
            let mid = (prev.checked_add(next)? / Decimal::TWO).normalize();
            (prev < mid && mid < next).then_some(mid)?
        }
        (Some(prev), None) => prev.checked_add(Decimal::ONE)?,
        (None, Some(next)) => next.checked_sub(Decimal::ONE)?,
        (None, None) => Decimal::ZERO,
    };
    (key.scale() <= MAX_SORT_KEY_SCALE).then_some(key)
}

/// 重新編號欄位，返回排序鍵有變更的卡片
fn renumber(cards: &mut [BoardCard]) -> Vec<(Uuid, Decimal)> {
    let mut changed = Vec::new();
    for (position, card) in cards.iter_mut().enumerate() {
        let key = Decimal::from(RENUMBER_STEP * (position as i64 + 1));
        if card.sort_key != key {
            card.sort_key = key;
            changed.push((card.id, key));
        }
    }
    changed
}
