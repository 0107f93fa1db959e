use std::collections::{BTreeMap, VecDeque};
use std::fmt::Write as _;

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::work_list::{Weighted, WorkList};

/// Column widths of the preorder listing.
const SYMBOL_COLUMN: usize = 30;
const SIDE_COLUMN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
    size: usize,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        // leaves come out of the table in ascending byte order, which is what
        // decides ties once the list is sorted
        let nodes: Vec<HuffNode> = frequencies
            .iter()
            .map(|(byte, count)| HuffNode::new(byte, count))
            .collect();

        let list = WorkList::build(nodes);
        if list.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        HuffmanTree::build_from_list(list)
    }

    fn build_from_list(mut list: WorkList<HuffNode>) -> Result<Self> {
        let mut size = list.len();

        while list.len() > 1 {
            let x = list.extract_min().ok_or(HuffmanError::EmptyInput)?;
            let y = list.extract_min().ok_or(HuffmanError::EmptyInput)?;

            debug!(
                left = %x.label(),
                right = %y.label(),
                weight = x.weight() + y.weight(),
                "merging nodes"
            );

            list.insert(HuffNode::merge(x, y));
            size += 1;
        }

        let root = list.into_last().ok_or(HuffmanError::EmptyInput)?;
        debug!(nodes = size, weight = root.weight(), "huffman tree built");

        Ok(HuffmanTree { root, size })
    }

    /// Total number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.size
    }

    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.root.contains(byte)
    }

    /// Leaf symbols in left-to-right order.
    pub fn leaf_symbols(&self) -> Vec<u8> {
        self.root.symbols().to_vec()
    }

    /// Checks that every internal weight is the sum of its children.
    pub fn check_weights(&self) -> bool {
        self.root.check_weights()
    }

    /// Byte -> (code, bit length), code bits ordered root first from the MSB
    /// of the used length.
    ///
    /// A tree holding a single leaf gives that byte the one-bit code `0`.
    pub fn generate_table(&self) -> BTreeMap<u8, (u64, usize)> {
        let mut table = BTreeMap::new();
        match &self.root {
            HuffNode::Leaf { byte, .. } => {
                table.insert(*byte, (0, 1));
            }
            internal => internal.generate_table(&mut table, 0, 0),
        }
        table
    }

    /// Walks the tree by symbol-set membership and returns the path to
    /// `byte` (`false` = left, `true` = right).
    pub fn codeword(&self, byte: u8) -> Option<Vec<bool>> {
        if !self.root.contains(byte) {
            return None;
        }

        let mut path = Vec::new();
        let mut node = &self.root;
        while let HuffNode::Internal { left, right, .. } = node {
            if left.contains(byte) {
                path.push(false);
                node = left;
            } else {
                path.push(true);
                node = right;
            }
        }

        if path.is_empty() {
            path.push(false);
        }
        Some(path)
    }

    pub fn print_structure(&self) {
        print!("{}", self.render_preorder());
    }

    /// Preorder listing of every node below the root with its side and its
    /// parent's symbols.
    pub fn render_preorder(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Root: \"{}\"", self.root.label());
        let _ = writeln!(
            out,
            "{:<w1$}{:<w2$}{:<w1$}",
            "String",
            "L/R Child",
            "Parent",
            w1 = SYMBOL_COLUMN,
            w2 = SIDE_COLUMN
        );
        let _ = writeln!(
            out,
            "{:<w1$}{:<w2$}{:<w1$}",
            "------",
            "---------",
            "------",
            w1 = SYMBOL_COLUMN,
            w2 = SIDE_COLUMN
        );

        if let HuffNode::Internal { left, right, .. } = &self.root {
            let parent = self.root.label();
            Self::render_node(&mut out, left, "L", &parent);
            Self::render_node(&mut out, right, "R", &parent);
        }
        out
    }

    fn render_node(out: &mut String, node: &HuffNode, side: &str, parent: &str) {
        let label = format!("\"{}\"", node.label());
        let _ = writeln!(
            out,
            "{:<w1$}{:<w2$}{}",
            label,
            side,
            parent,
            w1 = SYMBOL_COLUMN,
            w2 = SIDE_COLUMN
        );

        if let HuffNode::Internal { left, right, .. } = node {
            let parent = node.label();
            Self::render_node(out, left, "L", &parent);
            Self::render_node(out, right, "R", &parent);
        }
    }

    /// Breadth-first listing, one line per tree level.
    pub fn render_levels(&self) -> String {
        let mut out = String::new();
        let mut queue = VecDeque::new();
        queue.push_back((&self.root, 0usize));
        let mut current_level = None;

        while let Some((node, level)) = queue.pop_front() {
            if current_level != Some(level) {
                if current_level.is_some() {
                    out.push('\n');
                }
                let heading = if level == 0 {
                    "Root:".to_string()
                } else {
                    format!("Level {}:", level)
                };
                let _ = write!(out, "{:<10}", heading);
                current_level = Some(level);
            }

            let _ = write!(out, "\"{}\"   ", node.label());

            if let HuffNode::Internal { left, right, .. } = node {
                queue.push_back((left, level + 1));
                queue.push_back((right, level + 1));
            }
        }
        out.push('\n');
        out
    }
}

impl TryFrom<&str> for HuffmanTree {
    type Error = HuffmanError;

    fn try_from(text: &str) -> Result<Self> {
        HuffmanTree::from_bytes(text.as_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        byte: u8,
    },
    Internal {
        weight: usize,
        /// Every byte below this node, left subtree first.
        symbols: Vec<u8>,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(b: u8, f: usize) -> Self {
        HuffNode::Leaf { weight: f, byte: b }
    }

    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    pub fn symbols(&self) -> &[u8] {
        match self {
            HuffNode::Leaf { byte, .. } => std::slice::from_ref(byte),
            HuffNode::Internal { symbols, .. } => symbols,
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.symbols().contains(&byte)
    }

    /// Printable form of the symbols under this node.
    pub fn label(&self) -> String {
        self.symbols()
            .iter()
            .flat_map(|&b| std::ascii::escape_default(b))
            .map(char::from)
            .collect()
    }

    pub fn merge(a: Self, b: Self) -> Self {
        // a is the lighter node and goes left
        let weight = a.weight() + b.weight();
        let mut symbols = Vec::with_capacity(a.symbols().len() + b.symbols().len());
        symbols.extend_from_slice(a.symbols());
        symbols.extend_from_slice(b.symbols());

        HuffNode::Internal {
            weight,
            symbols,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    fn check_weights(&self) -> bool {
        match self {
            HuffNode::Leaf { .. } => true,
            HuffNode::Internal {
                weight,
                left,
                right,
                ..
            } => {
                *weight == left.weight() + right.weight()
                    && left.check_weights()
                    && right.check_weights()
            }
        }
    }

    pub fn generate_table(&self, code_table: &mut BTreeMap<u8, (u64, usize)>, code: u64, depth: usize) {
        match self {
            HuffNode::Leaf { byte, .. } => {
                code_table.insert(*byte, (code, depth));
            }
            HuffNode::Internal { left, right, .. } => {
                // Left = 0, Right = 1, building codes from MSB to LSB
                left.generate_table(code_table, code << 1, depth + 1);
                right.generate_table(code_table, (code << 1) | 1, depth + 1);
            }
        }
    }
}

impl Weighted for HuffNode {
    fn weight(&self) -> usize {
        HuffNode::weight(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf(byte: u8, weight: usize) -> HuffNode {
        HuffNode::new(byte, weight)
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            HuffmanTree::from_bytes(b""),
            Err(HuffmanError::EmptyInput)
        ));
    }

    #[test]
    fn test_two_symbol_shape() {
        let tree = HuffmanTree::from_bytes(b"AAB").unwrap();
        assert_eq!(
            tree.root,
            HuffNode::merge(leaf(b'B', 1), leaf(b'A', 2))
        );
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.weight(), 3);
        assert_eq!(tree.leaf_symbols(), b"BA".to_vec());
    }

    #[test]
    fn test_equal_weights_resolve_by_byte_order() {
        // all four tie: d and c sit at the light end and merge first, the new
        // node jumps ahead of the remaining leaves of weight 1
        let tree = HuffmanTree::from_bytes(b"dcba").unwrap();
        let expected = HuffNode::merge(
            HuffNode::merge(leaf(b'b', 1), leaf(b'a', 1)),
            HuffNode::merge(leaf(b'd', 1), leaf(b'c', 1)),
        );
        assert_eq!(tree.root, expected);

        let table = tree.generate_table();
        assert_eq!(table[&b'b'], (0b00, 2));
        assert_eq!(table[&b'a'], (0b01, 2));
        assert_eq!(table[&b'd'], (0b10, 2));
        assert_eq!(table[&b'c'], (0b11, 2));
    }

    #[test]
    fn test_merged_node_goes_after_equal_weights() {
        // a:3 b:2 c:1 d:1 -> c+d = 2 lands after b, so b is popped before it
        let tree = HuffmanTree::from_bytes(b"aaabbcd").unwrap();
        let cd = HuffNode::merge(leaf(b'd', 1), leaf(b'c', 1));
        let bcd = HuffNode::merge(cd, leaf(b'b', 2));
        let expected = HuffNode::merge(leaf(b'a', 3), bcd);
        assert_eq!(tree.root, expected);
    }

    #[test]
    fn test_single_symbol_tree() {
        let tree = HuffmanTree::from_bytes(b"zzzz").unwrap();
        assert_eq!(tree.root, leaf(b'z', 4));
        assert!(tree.root.is_leaf());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.generate_table()[&b'z'], (0, 1));
        assert_eq!(tree.codeword(b'z'), Some(vec![false]));
        assert_eq!(tree.codeword(b'y'), None);
    }

    #[test]
    fn test_structure_invariants() {
        let text = b"the quick brown fox jumps over the lazy dog\n";
        let tree = HuffmanTree::from_bytes(text).unwrap();
        let frequencies = FrequencyTable::from_bytes(text);

        assert!(tree.check_weights());
        assert_eq!(tree.node_count(), 2 * frequencies.distinct() - 1);
        assert_eq!(tree.weight(), text.len());

        let mut leaves = tree.leaf_symbols();
        leaves.sort_unstable();
        let expected: Vec<u8> = frequencies.iter().map(|(b, _)| b).collect();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn test_deterministic_build() {
        let text = b"mississippi river banks";
        let a = HuffmanTree::from_bytes(text).unwrap();
        let b = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(text)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_codeword_matches_table() {
        let tree = HuffmanTree::try_from("abracadabra alakazam").unwrap();
        for (byte, (code, len)) in tree.generate_table() {
            let path = tree.codeword(byte).unwrap();
            assert_eq!(path.len(), len);
            let from_path = path.iter().fold(0u64, |acc, &bit| (acc << 1) | bit as u64);
            assert_eq!(from_path, code, "mismatch for {}", byte as char);
        }
    }

    #[test]
    fn test_render_preorder() {
        let tree = HuffmanTree::from_bytes(b"AAB").unwrap();
        let text = tree.render_preorder();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Root: \"BA\"");
        assert!(lines[3].starts_with("\"B\""));
        assert!(lines[3].contains('L'));
        assert!(lines[3].ends_with("BA"));
        assert!(lines[4].starts_with("\"A\""));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_render_levels() {
        let tree = HuffmanTree::from_bytes(b"dcba").unwrap();
        let text = tree.render_levels();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Root:"));
        assert!(lines[1].contains("\"ba\"") && lines[1].contains("\"dc\""));
        assert!(lines[2].starts_with("Level 2:"));
    }

    #[test]
    fn test_label_escapes_control_bytes() {
        let tree = HuffmanTree::from_bytes(b"a\n").unwrap();
        // 'a' sorts after '\n' so it is popped first and goes left
        assert_eq!(tree.root.label(), "a\\n");
    }
}
