//! Recording stand-in for the ORM facade the generated code calls.

#![allow(dead_code)]

pub type DbResult<T> = Result<T, String>;

#[derive(Debug, Default)]
pub struct Db {
    pub calls: Vec<String>,
}

impl Db {
    fn push(mut self, call: String) -> Self {
        self.calls.push(call);
        self
    }

    pub fn model<T>(self) -> Self {
        let name = std::any::type_name::<T>();
        self.push(format!("model {name}"))
    }

    pub fn where_clause<V>(self, sql: &str, _value: V) -> Self {
        self.push(format!("where {sql}"))
    }

    pub fn where_raw(self, sql: &str) -> Self {
        self.push(format!("where {sql}"))
    }

    pub fn order(self, sql: &str) -> Self {
        self.push(format!("order {sql}"))
    }

    pub fn limit(self, n: u64) -> Self {
        self.push(format!("limit {n}"))
    }

    pub fn offset(self, n: u64) -> Self {
        self.push(format!("offset {n}"))
    }

    pub fn preload(self, name: &str) -> Self {
        self.push(format!("preload {name}"))
    }

    pub fn find<T>(self) -> DbResult<Vec<T>> {
        Ok(Vec::new())
    }

    pub fn first<T>(self) -> DbResult<T> {
        Err("record not found".to_string())
    }

    pub fn count(self) -> DbResult<u64> {
        Ok(self.calls.len() as u64)
    }

    pub fn create<T>(self, _obj: &T) -> DbResult<()> {
        Ok(())
    }

    pub fn delete<T>(self) -> DbResult<u64> {
        Ok(self.calls.len() as u64)
    }

    pub fn set_column<V>(self, column: &str, _value: V) -> Self {
        self.push(format!("set {column}"))
    }

    pub fn update_columns(self) -> DbResult<u64> {
        Ok(self.calls.iter().filter(|c| c.starts_with("set ")).count() as u64)
    }
}
