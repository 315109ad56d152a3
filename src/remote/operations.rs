//! Row select/insert/update/delete.

use super::query::id_params;
use super::*;

impl RestClient {
    pub fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Select,
    ) -> Result<Vec<T>, StoreError> {
        let label = format!("select {}", table);
        with_retries(|| {
            let req = self.client.get(self.table_url(table)).query(&query.to_params());
            let resp = self.send(req, &label)?;
            self.read_json(resp, &label)
        })
    }

    /// Insert one row and return it as stored.
    pub fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, StoreError> {
        let label = format!("insert into {}", table);
        let req = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row);
        let resp = self.send(req, &label)?;
        let rows: Vec<T> = self.read_json(resp, &label)?;
        rows.into_iter().next().ok_or_else(|| StoreError::EmptyInsert {
            table: table.to_string(),
        })
    }

    pub fn update<B: Serialize>(&self, table: &str, id: &str, patch: &B) -> Result<(), StoreError> {
        let label = format!("update {}", table);
        let req = self
            .client
            .patch(self.table_url(table))
            .query(&id_params(id))
            .header("Prefer", "return=minimal")
            .json(patch);
        self.send(req, &label)?;
        Ok(())
    }

    pub fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let label = format!("delete from {}", table);
        let req = self.client.delete(self.table_url(table)).query(&id_params(id));
        self.send(req, &label)?;
        Ok(())
    }
}
