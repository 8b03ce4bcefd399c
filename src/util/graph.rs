/// Basic directed graph over vector indices
/// - source: http://smallcultfollowing.com/babysteps/blog/2015/04/06/modeling-graphs-in-rust-using-vector-indices/

pub type NodeIndex = usize;

#[derive(Debug, PartialEq)]
struct NodeData<V> {
    node: V,
    /// Nodes this node depends on, in edge-insertion order.
    deps: Vec<NodeIndex>,
}

#[derive(Debug, PartialEq)]
pub struct Graph<V> {
    vertices: Vec<NodeData<V>>,
    edge_count: usize,
}

impl<V> Graph<V> {
    /// Creates an empty `Graph` struct.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates an empty `Graph` struct with reserved capacity for `nodes`.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Adds a new node to the graph.
    ///
    /// Returns the `NodeIndex` to remember the node.
    pub fn add_node(&mut self, node: V) -> NodeIndex {
        let index = self.vertices.len();
        self.vertices.push(NodeData {
            node: node,
            deps: Vec::new(),
        });
        index
    }

    /// Checks if a given `node` is in the graph.
    pub fn has_node(&self, node: NodeIndex) -> bool {
        node < self.node_count()
    }

    /// Checks if `target` already depends on `source`.
    pub fn has_edge(&self, source: NodeIndex, target: NodeIndex) -> bool {
        match self.vertices.get(target) {
            Some(v) => v.deps.iter().find(|f| f == &&source).is_some(),
            None => false,
        }
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Accesses the node data label behind the `node` index.
    pub fn get_node(&self, node: NodeIndex) -> Option<&V> {
        Some(&self.vertices.get(node)?.node)
    }

    /// Checks if the graph has zero nodes.
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Adds a new edge to the graph from `source` to `target`, meaning
    /// `source` must be processed before `target`.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex) -> EdgeStatus {
        if self.has_node(source) == false {
            return EdgeStatus::MissingSource;
        }
        if self.has_node(target) == false {
            return EdgeStatus::MissingTarget;
        }
        // do not allow self-loops
        if source == target {
            return EdgeStatus::SelfLoop;
        }
        // do not allow duplicate edges
        if self.has_edge(source, target) == true {
            return EdgeStatus::AlreadyExists;
        }
        self.vertices[target].deps.push(source);
        self.edge_count += 1;
        EdgeStatus::Success
    }

    /// Creates an iterator over the nodes the `target` node depends on.
    pub fn dependencies(&self, target: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.vertices[target].deps.iter().copied()
    }

    /// Returns the number of dependencies of the `target` node.
    pub fn in_degree(&self, target: NodeIndex) -> usize {
        self.vertices[target].deps.len()
    }

    /// Performs depth-first topological sort to give in-order nodes such that
    /// every dependency is placed before its dependents.
    ///
    /// Nodes are visited in insertion order so that independent nodes keep
    /// their original relative order. Errors with the closed walk of node
    /// indices when a cycle is encountered.
    pub fn sort(&self) -> Result<Vec<NodeIndex>, Vec<NodeIndex>> {
        if self.is_empty() == true {
            return Ok(Vec::new());
        }
        let mut order = Vec::with_capacity(self.node_count());
        let mut marks = vec![Mark::Fresh; self.node_count()];
        let mut stack = Vec::new();
        for i in 0..self.node_count() {
            if marks[i] == Mark::Fresh {
                self.visit(i, &mut marks, &mut stack, &mut order)?;
            }
        }
        Ok(order)
    }

    fn visit(
        &self,
        node: NodeIndex,
        marks: &mut Vec<Mark>,
        stack: &mut Vec<NodeIndex>,
        order: &mut Vec<NodeIndex>,
    ) -> Result<(), Vec<NodeIndex>> {
        marks[node] = Mark::Visiting;
        stack.push(node);
        for dep in &self.vertices[node].deps {
            match marks[*dep] {
                Mark::Fresh => self.visit(*dep, marks, stack, order)?,
                // a node already on the recursion stack closes a cycle
                Mark::Visiting => {
                    let entry = stack.iter().position(|n| n == dep).unwrap();
                    let mut walk: Vec<NodeIndex> = stack[entry..].to_vec();
                    walk.push(*dep);
                    return Err(walk);
                }
                Mark::Complete => (),
            }
        }
        stack.pop();
        marks[node] = Mark::Complete;
        order.push(node);
        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum Mark {
    Fresh,
    Visiting,
    Complete,
}

#[derive(Debug, PartialEq)]
pub enum EdgeStatus {
    MissingSource,
    MissingTarget,
    SelfLoop,
    AlreadyExists,
    Success,
}

impl EdgeStatus {
    pub fn is_ok(&self) -> bool {
        match self {
            Self::Success => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Creates a three-node chain: node 2 before node 1 before node 0.
    fn chain() -> Graph<()> {
        let mut g = Graph::new();
        let x = g.add_node(());
        let y = g.add_node(());
        let z = g.add_node(());
        g.add_edge(y, x); // x depends on y
        g.add_edge(z, y); // y depends on z
        g
    }

    /// Creates an example binary tree with height = 2. Edges are directed up
    /// indicating the child is a dependency to the parent.
    ///
    ///         n0
    ///        /  \
    ///     n1     n4
    ///    /  \   /  \
    /// n2   n3 n5   n6
    fn binary_tree() -> Graph<()> {
        let mut g = Graph::new();
        let n0 = g.add_node(());
        let n1 = g.add_node(());
        let n2 = g.add_node(());
        let n3 = g.add_node(());
        let n4 = g.add_node(());
        let n5 = g.add_node(());
        let n6 = g.add_node(());
        // level 1
        g.add_edge(n1, n0);
        g.add_edge(n4, n0);
        // level 2 - L
        g.add_edge(n2, n1);
        g.add_edge(n3, n1);
        // level 2 - R
        g.add_edge(n5, n4);
        g.add_edge(n6, n4);
        g
    }

    #[test]
    fn add_node_and_has_node() {
        let mut g: Graph<()> = Graph::new();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.has_node(0), false);
        g.add_node(());
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.has_node(0), true);
        assert_eq!(g.has_node(1), false);
    }

    #[test]
    fn add_edge() {
        let mut g = Graph::new();
        assert_eq!(g.edge_count(), 0);
        let n0 = g.add_node(());
        let n1 = g.add_node(());
        assert_eq!(g.add_edge(n0, n1).is_ok(), true);
        assert_eq!(g.edge_count(), 1);
        // do not allow duplicate edges
        assert_eq!(g.add_edge(n0, n1), EdgeStatus::AlreadyExists);
        assert_eq!(g.edge_count(), 1);
        // do not allow self-loops
        assert_eq!(g.add_edge(n0, n0), EdgeStatus::SelfLoop);
        // missing endpoints are refused
        assert_eq!(g.add_edge(n0, 7), EdgeStatus::MissingTarget);
        assert_eq!(g.add_edge(7, n0), EdgeStatus::MissingSource);
    }

    #[test]
    fn dependencies() {
        let g = chain();
        assert_eq!(g.dependencies(0).collect::<Vec<NodeIndex>>(), vec![1]);
        assert_eq!(g.dependencies(1).collect::<Vec<NodeIndex>>(), vec![2]);
        assert_eq!(
            g.dependencies(2).collect::<Vec<NodeIndex>>(),
            Vec::<NodeIndex>::new()
        );
        assert_eq!(g.in_degree(0), 1);
        assert_eq!(g.in_degree(2), 0);
    }

    #[test]
    fn sort_chain() {
        let g = chain();
        assert_eq!(g.sort(), Ok(vec![2, 1, 0]));
    }

    #[test]
    fn sort_tree() {
        let g = binary_tree();
        // every dependency first, ties in insertion order
        assert_eq!(g.sort(), Ok(vec![2, 3, 1, 5, 6, 4, 0]));
    }

    #[test]
    fn sort_keeps_insertion_order_without_edges() {
        let mut g = Graph::new();
        for _ in 0..5 {
            g.add_node(());
        }
        assert_eq!(g.sort(), Ok(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn sort_empty() {
        let g: Graph<()> = Graph::new();
        assert_eq!(g.sort(), Ok(Vec::new()));
    }

    #[test]
    fn sort_two_node_cycle() {
        let mut g = Graph::new();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(a, b);
        g.add_edge(b, a);
        assert_eq!(g.sort(), Err(vec![0, 1, 0]));
    }

    #[test]
    fn sort_inner_cycle() {
        // 0 is fine on its own; 1 -> 2 -> 3 -> 1 loops
        let mut g = Graph::new();
        let n0 = g.add_node(());
        let n1 = g.add_node(());
        let n2 = g.add_node(());
        let n3 = g.add_node(());
        g.add_edge(n0, n1);
        g.add_edge(n2, n1);
        g.add_edge(n3, n2);
        g.add_edge(n1, n3);
        assert_eq!(g.sort(), Err(vec![1, 2, 3, 1]));
    }

    #[test]
    fn get_node() {
        let mut g = Graph::<&str>::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        g.add_edge(a, b);
        assert_eq!(g.get_node(a).unwrap(), &"a");
        assert_eq!(g.get_node(b).unwrap(), &"b");
        assert_eq!(g.get_node(100), None);
    }

    #[test]
    fn has_edge() {
        let mut g = Graph::new();
        let n0 = g.add_node(());
        let n1 = g.add_node(());
        assert_eq!(g.has_edge(n0, n1), false);
        g.add_edge(n0, n1);
        assert_eq!(g.has_edge(n0, n1), true);
        assert_eq!(g.has_edge(n1, n0), false);
    }
}
