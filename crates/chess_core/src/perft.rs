use crate::{board::Position, movegen::legal_moves_into, notation::move_to_lan, types::Move};

/// Count leaf nodes of the legal move tree down to `depth`.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    count(pos, &mut layers)
}

/// Per-root-move breakdown, keyed by long algebraic move text.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(String, u64)> {
    let mut root = Vec::new();
    legal_moves_into(pos, &mut root);
    let mut layers = vec![Vec::with_capacity(64); depth.saturating_sub(1) as usize];
    root.into_iter()
        .filter_map(|mv| {
            let undo = pos.make_move(mv).ok()?;
            let nodes = count(pos, &mut layers);
            pos.unmake_move(mv, undo);
            Some((move_to_lan(mv), nodes))
        })
        .collect()
}

// One reusable move buffer per remaining ply.
fn count(pos: &mut Position, layers: &mut [Vec<Move>]) -> u64 {
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 1;
    };
    legal_moves_into(pos, buf);
    if rest.is_empty() {
        return buf.len() as u64;
    }

    let mut nodes = 0;
    for &mv in buf.iter() {
        let Ok(undo) = pos.make_move(mv) else {
            continue;
        };
        nodes += count(pos, rest);
        pos.unmake_move(mv, undo);
    }
    nodes
}
