use crate::types::Action;

/// A contiguous run of one repeated action, the unit crossover and mutation work on
pub type Block = Vec<Action>;

pub const MAX_BLOCK_LEN: usize = 10;

/// Segment `actions` into blocks whose concatenation is the input.
///
/// Runs longer than [`MAX_BLOCK_LEN`] are cut once, at `len / 2`, so a run
/// of 21 becomes blocks of 10 and 11.
pub fn split_into_blocks(actions: &[Action]) -> Vec<Block> {
    let mut blocks = Vec::new();
    for run in actions.chunk_by(|a, b| a == b) {
        if run.len() > MAX_BLOCK_LEN {
            let (head, tail) = run.split_at(run.len() / 2);
            blocks.push(head.to_vec());
            blocks.push(tail.to_vec());
        } else {
            blocks.push(run.to_vec());
        }
    }
    blocks
}

/// Concatenate blocks back into a flat action sequence.
pub fn flatten_blocks(blocks: &[Block]) -> Vec<Action> {
    blocks.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(blocks: &[Block]) -> Vec<usize> {
        blocks.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_runs_become_blocks() {
        let actions = vec![1, 1, 1, 2, 2, 3];
        let blocks = split_into_blocks(&actions);
        assert_eq!(blocks, vec![vec![1, 1, 1], vec![2, 2], vec![3]]);
    }

    #[test]
    fn test_long_runs_are_halved() {
        assert_eq!(lengths(&split_into_blocks(&[4; 12])), vec![6, 6]);
        assert_eq!(lengths(&split_into_blocks(&[4; 21])), vec![10, 11]);
        assert_eq!(lengths(&split_into_blocks(&[4; 10])), vec![10]);
        assert_eq!(lengths(&split_into_blocks(&[4; 11])), vec![5, 6]);
    }

    #[test]
    fn test_same_action_after_other_run_starts_new_block() {
        let blocks = split_into_blocks(&[1, 1, 2, 1, 1]);
        assert_eq!(blocks, vec![vec![1, 1], vec![2], vec![1, 1]]);
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        assert!(split_into_blocks(&[]).is_empty());
    }
}
