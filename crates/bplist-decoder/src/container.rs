use bplist_types::Value;
use bplist_wire::sized_int::read_sized_int;

use crate::error::DecodeError;
use crate::extractor::ObjectExtractor;
use crate::variable::{payload, read_length};

impl ObjectExtractor<'_> {
    /// Array: `count` consecutive object references, resolved in order.
    ///
    /// ```text
    /// 0xA3 r0 r1 r2        each r is object_ref_size bytes
    /// ```
    pub(crate) fn extract_array(&mut self, offset: usize, marker: u8) -> Result<Value, DecodeError> {
        let buf = self.ctx.bytes();
        let (count, start) = read_length(buf, offset, marker)?;
        if count == 0 {
            return Ok(Value::Array(Vec::new()));
        }

        let refs = self.read_refs("array", start, count)?;
        let mut items = Vec::new();
        items
            .try_reserve_exact(refs.len())
            .map_err(|_| DecodeError::Allocation {
                kind: "array elements",
                count,
            })?;

        for index in refs {
            items.push(self.extract(index)?);
        }

        Ok(Value::Array(items))
    }

    /// Dictionary: `count` key references, then `count` value references.
    ///
    /// The two tables are parallel, not interleaved: pair `i` is
    /// `(keys[i], values[i])`.
    ///
    /// ```text
    /// 0xD2 k0 k1 v0 v1
    /// ```
    pub(crate) fn extract_dictionary(
        &mut self,
        offset: usize,
        marker: u8,
    ) -> Result<Value, DecodeError> {
        let buf = self.ctx.bytes();
        let (count, start) = read_length(buf, offset, marker)?;
        if count == 0 {
            return Ok(Value::Dictionary(Vec::new()));
        }

        let total = count
            .checked_mul(2)
            .ok_or(DecodeError::PayloadOutOfBounds {
                kind: "dictionary",
                offset: start,
                count,
            })?;
        let refs = self.read_refs("dictionary", start, total)?;
        let (keys, values) = refs.split_at(refs.len() / 2);

        let mut pairs = Vec::new();
        pairs
            .try_reserve_exact(keys.len())
            .map_err(|_| DecodeError::Allocation {
                kind: "dictionary pairs",
                count,
            })?;

        for (&key, &value) in keys.iter().zip(values) {
            let key = self.extract(key)?;
            let value = self.extract(value)?;
            pairs.push((key, value));
        }

        Ok(Value::Dictionary(pairs))
    }

    /// Read `count` object references of `object_ref_size` bytes at `start`.
    ///
    /// The whole table is bounds-checked up front, so a huge `count` fails
    /// before anything is allocated.
    fn read_refs(
        &self,
        kind: &'static str,
        start: usize,
        count: u64,
    ) -> Result<Vec<u64>, DecodeError> {
        let ref_size = self.ctx.object_ref_size();
        let table = payload(self.ctx.bytes(), kind, start, count, ref_size)?;

        let mut refs = Vec::new();
        refs.try_reserve_exact(table.len() / ref_size)
            .map_err(|_| DecodeError::Allocation {
                kind: "object references",
                count,
            })?;

        for entry in table.chunks_exact(ref_size) {
            refs.push(read_sized_int(entry, 0, ref_size)?);
        }

        Ok(refs)
    }
}
