use std::collections::HashMap;

use bplist_types::Value;
use bplist_wire::ObjectKind;

use crate::context::DecodeContext;
use crate::error::DecodeError;
use crate::{scalar, variable};

/// Node budget floor, applied however small the input is.
pub(crate) const MIN_NODE_LIMIT: u64 = 1 << 20;

/// Node budget granted per input byte above the floor.
pub(crate) const NODES_PER_INPUT_BYTE: u64 = 16;

/// Node budget for a container of `len` bytes.
pub(crate) fn node_limit_for(len: usize) -> u64 {
    u64::try_from(len)
        .unwrap_or(u64::MAX)
        .saturating_mul(NODES_PER_INPUT_BYTE)
        .max(MIN_NODE_LIMIT)
}

/// A memoised value and the number of nodes in its tree.
struct Cached {
    value: Value,
    nodes: u64,
}

/// Resolves object indices to values for one decode call.
///
/// Owns the memo cache: an index is inserted only after its extraction
/// succeeds, so a failure never leaves a cached entry behind. The cache is
/// dropped with the extractor when the decode returns.
///
/// Shared children are copied into every parent, so a few bytes of
/// references can describe an exponentially large tree. Every node handed
/// out (fresh or cloned from the memo) and every node held by the memo is
/// counted against `node_limit`; crossing it fails the decode with
/// [`DecodeError::NodeLimitExceeded`] before the copy is made.
///
/// There is no cycle guard. A container that references itself (directly
/// or through other containers) before its own extraction finishes recurses
/// until the stack is exhausted. Well-formed plists are acyclic.
pub(crate) struct ObjectExtractor<'a> {
    pub(crate) ctx: &'a DecodeContext<'a>,
    memo: HashMap<u64, Cached>,
    produced: u64,
    retained: u64,
    node_limit: u64,
}

impl<'a> ObjectExtractor<'a> {
    pub(crate) fn new(ctx: &'a DecodeContext<'a>) -> Self {
        Self::with_node_limit(ctx, node_limit_for(ctx.len()))
    }

    pub(crate) fn with_node_limit(ctx: &'a DecodeContext<'a>, node_limit: u64) -> Self {
        Self {
            ctx,
            memo: HashMap::new(),
            produced: 0,
            retained: 0,
            node_limit,
        }
    }

    /// Extract object `index`, consulting and filling the memo cache.
    pub(crate) fn extract(&mut self, index: u64) -> Result<Value, DecodeError> {
        self.ctx.check_index(index)?;

        if let Some(cached) = self.memo.get(&index) {
            tracing::trace!(index, nodes = cached.nodes, "memo hit");
            self.produced = self.produced.saturating_add(cached.nodes);
            check_node_limit(self.produced, self.retained, self.node_limit)?;
            return Ok(cached.value.clone());
        }

        let offset = self.ctx.object_offset(index)?;
        let before = self.produced;
        let value = self.extract_at(offset)?;
        self.produced = self.produced.saturating_add(1);
        let nodes = self.produced - before;

        self.retained = self.retained.saturating_add(nodes);
        check_node_limit(self.produced, self.retained, self.node_limit)?;
        self.memo.insert(
            index,
            Cached {
                value: value.clone(),
                nodes,
            },
        );
        Ok(value)
    }

    /// Dispatch on the marker byte at `offset`.
    ///
    /// `offset` must come from [`DecodeContext::object_offset`], which
    /// guarantees the marker byte is inside the buffer.
    fn extract_at(&mut self, offset: usize) -> Result<Value, DecodeError> {
        let buf = self.ctx.bytes();
        let marker = buf[offset];
        let kind = ObjectKind::from_marker(marker);
        tracing::trace!(offset, marker, kind = kind.label(), "extracting object");

        match kind {
            ObjectKind::Simple => scalar::extract_simple(offset, marker),
            ObjectKind::Int => scalar::extract_int(buf, offset),
            ObjectKind::Real => scalar::extract_real(buf, offset, marker),
            ObjectKind::Date => scalar::extract_date(buf, offset, marker),
            ObjectKind::Data => variable::extract_data(buf, offset, marker),
            ObjectKind::AsciiString => variable::extract_ascii_string(buf, offset, marker),
            ObjectKind::Utf16String => variable::extract_utf16_string(buf, offset, marker),
            ObjectKind::Uid => variable::extract_uid(buf, offset),
            ObjectKind::Array => self.extract_array(offset, marker),
            ObjectKind::Dictionary => self.extract_dictionary(offset, marker),
            ObjectKind::Unknown(_) => Err(DecodeError::UnknownMarker { offset, marker }),
        }
    }

    #[cfg(test)]
    pub(crate) fn memo_len(&self) -> usize {
        self.memo.len()
    }
}

fn check_node_limit(produced: u64, retained: u64, limit: u64) -> Result<(), DecodeError> {
    if produced.saturating_add(retained) > limit {
        return Err(DecodeError::NodeLimitExceeded { limit });
    }
    Ok(())
}
