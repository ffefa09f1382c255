//! ListingStore port - listing の正本（source of truth）
//!
//! ListingStore は全 listing を唯一所有します。
//! ビューは毎回ここから借用して再計算し、コピーを保持しません。
//!
//! # 設計原則
//! - 並び順は挿入順（新しいものが先頭）
//! - 遷移は in-place の置き換えで、並び順は変わらない
//! - 削除はしない

pub use crate::domain::errors::StoreError;
use crate::domain::{Listing, ListingId};

/// ListingStore は listing の保管場所
pub trait ListingStore {
    /// 先頭に追加する（most-recent-first）
    fn insert_front(&mut self, listing: Listing) -> Result<(), StoreError>;

    /// ID で取得
    fn get(&self, id: ListingId) -> Option<&Listing>;

    /// 同じ ID の listing を置き換える（位置は変えない）
    fn replace(&mut self, listing: Listing) -> Result<(), StoreError>;

    /// 全件（store の並び順）
    fn all(&self) -> &[Listing];

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}
