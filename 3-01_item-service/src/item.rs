use serde::{Deserialize, Serialize};

/// 📦 상품. id 는 저장소에 저장될 때 부여된다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Option<u64>,
    pub item_name: String,
    pub price: Option<u32>,
    pub quantity: Option<u32>,
}

impl Item {
    pub fn new(item_name: impl Into<String>, price: u32, quantity: u32) -> Self {
        Self {
            id: None,
            item_name: item_name.into(),
            price: Some(price),
            quantity: Some(quantity),
        }
    }
}

/// 등록/수정 요청 바디
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemParams {
    pub item_name: String,
    pub price: Option<u32>,
    pub quantity: Option<u32>,
}

impl From<ItemParams> for Item {
    fn from(params: ItemParams) -> Self {
        Self {
            id: None,
            item_name: params.item_name,
            price: params.price,
            quantity: params.quantity,
        }
    }
}
