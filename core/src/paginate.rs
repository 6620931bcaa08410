//! Splitting rendered tables into message-sized chunks
//!
//! Capacity is computed once from the header width: every chunk holds the
//! header plus the same number of data rows. Rows are assigned to chunks in
//! order, `row i -> chunk i / rows_per_chunk`, so chunk boundaries never
//! reorder or repack rows.

use thiserror::Error;

use crate::table::{TableGrid, width};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error(
        "a {header_len} character header leaves no room for rows in a {budget} character message with {reserved} reserved"
    )]
    Overflow {
        header_len: usize,
        budget: usize,
        reserved: usize,
    },
}

/// Number of data rows that fit next to the header in one chunk.
///
/// `header_line` includes the trailing newline.
pub fn rows_per_chunk(
    header_line: usize,
    budget: usize,
    reserved: usize,
) -> Result<usize, PaginationError> {
    let overflow = || PaginationError::Overflow {
        header_len: header_line.saturating_sub(1),
        budget,
        reserved,
    };
    if header_line == 0 {
        return Err(overflow());
    }

    let effective = budget as i64 - header_line as i64 - reserved as i64;
    let rows = effective.div_euclid(header_line as i64) - 1;
    if rows <= 0 {
        return Err(overflow());
    }
    Ok(rows as usize)
}

/// Split a grid into chunks of at most `budget` characters, each starting
/// with the header line. An empty grid yields no chunks.
pub fn paginate(
    grid: &TableGrid,
    budget: usize,
    reserved: usize,
) -> Result<Vec<String>, PaginationError> {
    let header_line = width(grid.header()) + 1;
    let capacity = rows_per_chunk(header_line, budget, reserved)?;

    let mut chunks: Vec<String> = Vec::new();
    for (i, row) in grid.rows().iter().enumerate() {
        let index = i / capacity;
        if index == chunks.len() {
            let mut chunk = String::with_capacity(header_line * (capacity + 1));
            chunk.push_str(grid.header());
            chunk.push('\n');
            chunks.push(chunk);
        }
        let chunk = &mut chunks[index];
        chunk.push_str(row);
        chunk.push('\n');
    }

    for (i, chunk) in chunks.iter().enumerate() {
        let len = width(chunk);
        if len > budget {
            // Rows wider than the header are not repacked
            tracing::warn!(chunk = i, len, budget, "Chunk exceeds message budget");
        }
    }

    tracing::debug!(
        rows = grid.rows().len(),
        chunks = chunks.len(),
        capacity,
        "Paginated table"
    );
    Ok(chunks)
}
