use serde::Deserialize;

/// JSON 物件中只取出 `name` 欄位，其餘欄位交給各自的建構函數。
#[derive(Clone, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}
