//! Role - actor の役割
//!
//! ロールはログイン時に選ばれ、その後は変更されません。
//! どの操作とどのビューを使えるかはロールで決まります。

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role は identity の役割を表現
///
/// 閉じた enum なので、ロールを追加すると各遷移箇所の `match` がコンパイルエラーになる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Posts surplus food.
    Donor,

    /// Receiving organization that claims listings.
    Receiver,

    /// Delivery partner that picks up claimed listings.
    Delivery,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Donor, Role::Receiver, Role::Delivery];

    /// 画面のヘッダーに出す表示名
    pub fn label(self) -> &'static str {
        match self {
            Role::Donor => "Food Donor",
            Role::Receiver => "Receiver",
            Role::Delivery => "Delivery Partner",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Donor => "DONOR",
            Role::Receiver => "RECEIVER",
            Role::Delivery => "DELIVERY",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::donor(Role::Donor, "\"DONOR\"", "Food Donor")]
    #[case::receiver(Role::Receiver, "\"RECEIVER\"", "Receiver")]
    #[case::delivery(Role::Delivery, "\"DELIVERY\"", "Delivery Partner")]
    fn role_wire_name_and_label(#[case] role: Role, #[case] json: &str, #[case] label: &str) {
        assert_eq!(serde_json::to_string(&role).unwrap(), json);
        assert_eq!(role.label(), label);
        assert_eq!(format!("\"{role}\""), json);
    }
}
