use anyhow::{bail, ensure, Context, Result};
use indexmap::IndexMap;
use regex::Regex;

use crate::parse_usize;

const DISK_SIZE: usize = 70_000_000;
const REQUIRED_FREE: usize = 30_000_000;
const SMALL_DIR_LIMIT: usize = 100_000;

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug)]
enum NodeKind {
    File { size: usize },
    Dir { children: IndexMap<String, NodeId> },
}

#[derive(Debug)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Directory tree stored as an arena. Children always have a higher id than their parent.
#[derive(Debug)]
struct FileSystem {
    nodes: Vec<Node>,
}

impl FileSystem {
    fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "/".to_string(),
                parent: None,
                kind: NodeKind::Dir {
                    children: IndexMap::new(),
                },
            }],
        }
    }

    fn is_dir(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].kind, NodeKind::Dir { .. })
    }

    fn children(&self, dir: NodeId) -> Result<&IndexMap<String, NodeId>> {
        match &self.nodes[dir].kind {
            NodeKind::Dir { children } => Ok(children),
            NodeKind::File { .. } => bail!("{} is not a directory", self.nodes[dir].name),
        }
    }

    fn parent(&self, id: NodeId) -> Result<NodeId> {
        self.nodes[id].parent.context("root has no parent")
    }

    /// Looks up a subdirectory of `dir` by name.
    fn subdir(&self, dir: NodeId, name: &str) -> Result<NodeId> {
        let child = *self
            .children(dir)?
            .get(name)
            .with_context(|| format!("no entry {:?} in {}", name, self.nodes[dir].name))?;
        ensure!(self.is_dir(child), "{:?} is a file", name);
        Ok(child)
    }

    /// Adds an entry to `dir`. Listing an existing entry again reuses it.
    fn insert(&mut self, dir: NodeId, name: &str, size: Option<usize>) -> Result<NodeId> {
        if let Some(&existing) = self.children(dir)?.get(name) {
            match (&self.nodes[existing].kind, size) {
                (NodeKind::Dir { .. }, None) => return Ok(existing),
                (NodeKind::File { size: old }, Some(new)) if *old == new => return Ok(existing),
                _ => bail!("conflicting listing for {:?}", name),
            }
        }

        let id = self.nodes.len();
        let kind = match size {
            Some(size) => NodeKind::File { size },
            None => NodeKind::Dir {
                children: IndexMap::new(),
            },
        };
        self.nodes.push(Node {
            name: name.to_string(),
            parent: Some(dir),
            kind,
        });
        if let NodeKind::Dir { children } = &mut self.nodes[dir].kind {
            children.insert(name.to_string(), id);
        }
        Ok(id)
    }

    /// Total size of every node, indexed by id, in a single bottom-up pass.
    fn totals(&self) -> Vec<usize> {
        let mut totals = vec![0; self.nodes.len()];
        for id in (0..self.nodes.len()).rev() {
            if let NodeKind::File { size } = self.nodes[id].kind {
                totals[id] = size;
            }
            if let Some(parent) = self.nodes[id].parent {
                totals[parent] += totals[id];
            }
        }
        totals
    }

    /// Total size of a node, recomputed from its subtree without recursion.
    fn size(&self, id: NodeId) -> usize {
        let mut total: usize = 0;
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            match &self.nodes[id].kind {
                NodeKind::File { size } => total += *size,
                NodeKind::Dir { children } => pending.extend(children.values()),
            }
        }
        total
    }

    /// Picks the directory entries out of `totals`.
    fn dir_sizes(&self, totals: &[usize]) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&id| self.is_dir(id))
            .map(|id| totals[id])
            .collect()
    }
}

fn parse_terminal(input: &str) -> Result<FileSystem> {
    let re = Regex::new(
        r"^(?:\$ cd (?P<cd>[^ ]+)|(?P<ls>\$ ls)|dir (?P<dir>[^ ]+)|(?P<size>[0-9]+) (?P<file>[^ ]+))$",
    )?;

    let mut fs = FileSystem::new();
    let mut cwd = ROOT;
    let mut listing = false;

    for (i, line) in input.lines().map(str::trim).enumerate() {
        if line.is_empty() {
            continue;
        }
        let line_no = i + 1;
        let caps = re
            .captures(line)
            .with_context(|| format!("line {}: unrecognized output {:?}", line_no, line))?;

        if let Some(target) = caps.name("cd") {
            listing = false;
            cwd = match target.as_str() {
                "/" => Ok(ROOT),
                ".." => fs.parent(cwd),
                name => fs.subdir(cwd, name),
            }
            .with_context(|| format!("line {}", line_no))?;
        } else if caps.name("ls").is_some() {
            listing = true;
        } else {
            ensure!(listing, "line {}: listing outside of ls", line_no);
            let (name, size) = match (caps.name("dir"), caps.name("size"), caps.name("file")) {
                (Some(dir), _, _) => (dir.as_str(), None),
                (None, Some(size), Some(file)) => {
                    let size = parse_usize(size.as_str().as_bytes())
                        .with_context(|| format!("line {}: file size out of range", line_no))?;
                    (file.as_str(), Some(size))
                }
                _ => bail!("line {}: malformed listing", line_no),
            };
            fs.insert(cwd, name, size).with_context(|| format!("line {}", line_no))?;
        }
    }

    Ok(fs)
}

pub fn day7(input: &str) -> Result<(usize, usize)> {
    let fs = parse_terminal(input)?;
    let totals = fs.totals();
    let sizes = fs.dir_sizes(&totals);

    let part1 = sizes.iter().filter(|&&size| size <= SMALL_DIR_LIMIT).sum();

    let used = fs.size(ROOT);
    let needed = REQUIRED_FREE.saturating_sub(DISK_SIZE.saturating_sub(used));
    let part2 = sizes
        .iter()
        .copied()
        .filter(|&size| size >= needed)
        .min()
        .context("no directory frees enough space")?;

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        $ cd /
        $ ls
        dir a
        14848514 b.txt
        8504156 c.dat
        dir d
        $ cd a
        $ ls
        dir e
        29116 f
        2557 g
        62596 h.lst
        $ cd e
        $ ls
        584 i
        $ cd ..
        $ cd ..
        $ cd d
        $ ls
        4060174 j
        8033020 d.log
        5626152 d.ext
        7214296 k
    "};

    #[test]
    fn test_day7() -> Result<()> {
        assert_eq!(day7(EXAMPLE)?, (95437, 24933642));
        Ok(())
    }

    #[test]
    fn test_sizes() -> Result<()> {
        let fs = parse_terminal(EXAMPLE)?;
        let a = fs.subdir(ROOT, "a")?;
        let e = fs.subdir(a, "e")?;
        assert_eq!(fs.size(e), 584);
        assert_eq!(fs.size(a), 94853);
        assert_eq!(fs.size(fs.subdir(ROOT, "d")?), 24933642);
        assert_eq!(fs.size(ROOT), 48381165);

        let totals = fs.totals();
        assert_eq!(totals[ROOT], fs.size(ROOT));
        let mut sizes = fs.dir_sizes(&totals);
        sizes.sort_unstable();
        assert_eq!(sizes, vec![584, 94853, 24933642, 48381165]);
        Ok(())
    }

    #[test]
    fn test_nested_directory() -> Result<()> {
        let input = indoc! {"
            $ cd /
            $ ls
            100 a
            dir sub
            $ cd sub
            $ ls
            50 b
        "};
        let fs = parse_terminal(input)?;
        assert_eq!(fs.size(ROOT), 150);
        assert_eq!(fs.size(fs.subdir(ROOT, "sub")?), 50);
        assert_eq!(day7(input)?, (200, 50));
        Ok(())
    }

    #[test]
    fn test_deeply_nested_directories() -> Result<()> {
        let depth = 100_000;
        let mut input = String::from("$ cd /\n");
        for _ in 0..depth {
            input.push_str("$ ls\ndir a\n$ cd a\n");
        }
        input.push_str("$ ls\n5 f\n");

        let fs = parse_terminal(&input)?;
        assert_eq!(fs.size(ROOT), 5);
        // Every directory on the chain holds the one file.
        assert_eq!(day7(&input)?, (5 * (depth + 1), 5));
        Ok(())
    }

    #[test]
    fn test_repeated_listing_is_idempotent() -> Result<()> {
        let input = "$ cd /\n$ ls\n10 a\ndir x\n$ ls\n10 a\ndir x\n";
        let fs = parse_terminal(input)?;
        assert_eq!(fs.size(ROOT), 10);
        assert!(parse_terminal("$ cd /\n$ ls\n10 a\ndir a\n").is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_navigation() {
        assert!(parse_terminal("$ cd ..\n").is_err());
        assert!(parse_terminal("$ cd missing\n").is_err());
        assert!(parse_terminal("$ ls\n10 f\n$ cd f\n").is_err());
        assert!(parse_terminal("10 f\n").is_err());
        assert!(parse_terminal("$ rm -rf /\n").is_err());
    }
}
