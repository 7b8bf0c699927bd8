//! Sequence access

use crate::error::ValueError;
use crate::value::Value;

impl Value {
    fn out_of_range(index: usize, len: usize) -> ValueError {
        ValueError::IndexOutOfRange { index, len }
    }

    pub fn get(&self, index: usize) -> Result<&Value, ValueError> {
        let items = self.as_sequence()?;
        items
            .get(index)
            .ok_or_else(|| Self::out_of_range(index, items.len()))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Value, ValueError> {
        let items = self.as_sequence_mut()?;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or_else(|| Self::out_of_range(index, len))
    }

    pub fn push_back(&mut self, value: Value) -> Result<(), ValueError> {
        self.as_sequence_mut()?.push(value);
        Ok(())
    }

    /// Remove and return the last element, `None` if the sequence is empty.
    pub fn pop_back(&mut self) -> Result<Option<Value>, ValueError> {
        Ok(self.as_sequence_mut()?.pop())
    }

    /// Number of elements. Only sequences have a size.
    pub fn size(&self) -> Result<usize, ValueError> {
        Ok(self.as_sequence()?.len())
    }
}
