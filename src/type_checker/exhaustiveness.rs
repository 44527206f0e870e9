//! Exhaustiveness of `match` cases.
//!
//! Coverage is decided per type over the whole list of case patterns. A
//! variable at a given level covers everything at that level. Nested
//! positions (injection payloads, variant payloads, record fields, tuple
//! items, list heads) are decided recursively over the column of
//! sub-patterns found at that position.
//!
//! The list rule reduces every pattern to its head patterns plus either a
//! fixed length or an open tail, and then checks head positions column by
//! column. This is unsound for case splits whose fixed-length and cons
//! patterns do not line up by position, e.g. one split on the first element
//! and another on the last.

use std::collections::{HashMap, HashSet};

use crate::ast::patterns::{Pattern, PatternKind};

use super::types::Type;

/// Peels parentheses and ascriptions, neither of which affects coverage.
fn strip(pattern: &Pattern) -> &Pattern {
    let mut pattern = pattern;
    loop {
        match &pattern.kind {
            PatternKind::Parenthesized(inner) => pattern = inner.as_ref(),
            PatternKind::Ascription { pattern: inner, .. } => pattern = inner.as_ref(),
            _ => return pattern,
        }
    }
}

pub fn is_exhaustive(patterns: &[&Pattern], scrutinee: &Type) -> bool {
    let exhaustive = covers(patterns, scrutinee);
    log::debug!(
        "{} patterns over {}: {}",
        patterns.len(),
        scrutinee,
        if exhaustive { "exhaustive" } else { "not exhaustive" }
    );

    exhaustive
}

fn covers(patterns: &[&Pattern], scrutinee: &Type) -> bool {
    let patterns: Vec<&Pattern> = patterns.iter().map(|pattern| strip(pattern)).collect();

    if patterns.is_empty() {
        return false;
    }
    if patterns
        .iter()
        .any(|pattern| matches!(pattern.kind, PatternKind::Var(_)))
    {
        return true;
    }

    match scrutinee {
        Type::Bool => {
            patterns.iter().any(|p| matches!(p.kind, PatternKind::True))
                && patterns.iter().any(|p| matches!(p.kind, PatternKind::False))
        }
        Type::Unit => patterns.iter().any(|p| matches!(p.kind, PatternKind::Unit)),
        Type::Sum(left, right) => {
            let mut lefts = vec![];
            let mut rights = vec![];
            for pattern in &patterns {
                match &pattern.kind {
                    PatternKind::Inl(inner) => lefts.push(inner.as_ref()),
                    PatternKind::Inr(inner) => rights.push(inner.as_ref()),
                    _ => {}
                }
            }

            covers(&lefts, left) && covers(&rights, right)
        }
        Type::Variant(labels) => covers_variant(&patterns, labels),
        Type::Record(fields) => covers_record(&patterns, fields),
        Type::Tuple(item_types) => covers_tuple(&patterns, item_types),
        Type::Nat => covers_nat(&patterns),
        Type::List(item_type) => covers_list(&patterns, item_type),
        Type::Fun(..) | Type::Ref(_) | Type::Top | Type::Bottom => false,
    }
}

fn covers_variant(patterns: &[&Pattern], labels: &[(String, Option<Type>)]) -> bool {
    let mut groups: HashMap<&str, Vec<&Pattern>> = HashMap::new();

    for pattern in patterns {
        match &pattern.kind {
            PatternKind::Variant { label, payload } => {
                let group = groups.entry(label.as_str()).or_default();
                if let Some(payload) = payload {
                    group.push(payload.as_ref());
                }
            }
            _ => return false,
        }
    }

    let declared: HashSet<&str> = labels.iter().map(|(label, _)| label.as_str()).collect();
    let observed: HashSet<&str> = groups.keys().copied().collect();
    if declared != observed {
        log::trace!("variant labels {:?} observed out of {:?}", observed, declared);
        return false;
    }

    labels.iter().all(|(label, payload_type)| match payload_type {
        Some(payload_type) => groups
            .get(label.as_str())
            .map_or(false, |group| covers(group, payload_type)),
        None => true,
    })
}

/// Fields no pattern mentions are left unconstrained.
fn covers_record(patterns: &[&Pattern], fields: &[(String, Type)]) -> bool {
    let mut groups: HashMap<&str, Vec<&Pattern>> = HashMap::new();

    for pattern in patterns {
        match &pattern.kind {
            PatternKind::Record(labelled) => {
                for field in labelled {
                    groups
                        .entry(field.label.as_str())
                        .or_default()
                        .push(&field.pattern);
                }
            }
            _ => return false,
        }
    }

    fields.iter().all(|(label, field_type)| {
        groups
            .get(label.as_str())
            .map_or(true, |group| covers(group, field_type))
    })
}

fn covers_tuple(patterns: &[&Pattern], item_types: &[Type]) -> bool {
    let mut rows = vec![];
    for pattern in patterns {
        match &pattern.kind {
            PatternKind::Tuple(items) if items.len() == item_types.len() => rows.push(items),
            _ => return false,
        }
    }

    item_types.iter().enumerate().all(|(index, item_type)| {
        let column: Vec<&Pattern> = rows.iter().map(|items| &items[index]).collect();
        covers(&column, item_type)
    })
}

/// Shape of a natural-number pattern once its `succ` layers are counted.
enum NatShape {
    /// Exactly this number.
    Fixed(u64),
    /// Every number from this one upwards.
    From(u64),
}

fn nat_shape(pattern: &Pattern) -> Option<NatShape> {
    let mut depth = 0u64;
    let mut pattern = strip(pattern);

    loop {
        match &pattern.kind {
            PatternKind::Succ(inner) => {
                depth += 1;
                pattern = strip(inner);
            }
            PatternKind::Int(value) => return Some(NatShape::Fixed(depth.saturating_add(*value))),
            PatternKind::Var(_) => return Some(NatShape::From(depth)),
            _ => return None,
        }
    }
}

fn covers_nat(patterns: &[&Pattern]) -> bool {
    let mut fixed = HashSet::new();
    let mut lowest_open: Option<u64> = None;

    for shape in patterns.iter().filter_map(|pattern| nat_shape(pattern)) {
        match shape {
            NatShape::Fixed(value) => {
                fixed.insert(value);
            }
            NatShape::From(bound) => {
                lowest_open = Some(lowest_open.map_or(bound, |lowest| lowest.min(bound)));
            }
        }
    }

    match lowest_open {
        Some(bound) => (0..bound).all(|value| fixed.contains(&value)),
        None => false,
    }
}

/// A list pattern as its head patterns plus what follows them.
struct ListShape<'a> {
    heads: Vec<&'a Pattern>,
    open_tail: bool,
}

fn list_shape(pattern: &Pattern) -> Option<ListShape<'_>> {
    let mut heads = vec![];
    let mut pattern = strip(pattern);

    loop {
        match &pattern.kind {
            PatternKind::Cons { head, tail } => {
                heads.push(head.as_ref());
                pattern = strip(tail);
            }
            PatternKind::List(items) => {
                heads.extend(items.iter());
                return Some(ListShape {
                    heads,
                    open_tail: false,
                });
            }
            PatternKind::Var(_) => {
                return Some(ListShape {
                    heads,
                    open_tail: true,
                })
            }
            _ => return None,
        }
    }
}

fn covers_list(patterns: &[&Pattern], item_type: &Type) -> bool {
    let shapes: Vec<ListShape<'_>> = patterns
        .iter()
        .filter_map(|pattern| list_shape(pattern))
        .collect();

    let lowest_open = match shapes
        .iter()
        .filter(|shape| shape.open_tail)
        .map(|shape| shape.heads.len())
        .min()
    {
        Some(lowest_open) => lowest_open,
        None => return false,
    };

    let fixed_lengths: HashSet<usize> = shapes
        .iter()
        .filter(|shape| !shape.open_tail)
        .map(|shape| shape.heads.len())
        .collect();
    if !(0..lowest_open).all(|length| fixed_lengths.contains(&length)) {
        return false;
    }

    (0..lowest_open).all(|position| {
        let column: Vec<&Pattern> = shapes
            .iter()
            .filter_map(|shape| shape.heads.get(position).copied())
            .collect();
        column.is_empty() || covers(&column, item_type)
    })
}
