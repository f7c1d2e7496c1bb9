use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_department_id: Option<String>,
}

impl Department {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_department_id: parent.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub given_name: String,
    #[serde(default)]
    pub company_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Parent -> child department graph.
pub struct DepartmentTree {
    graph: DiGraph<String, ()>,
    id_to_index: HashMap<String, NodeIndex>,
}

impl DepartmentTree {
    pub fn new(departments: &[Department]) -> Self {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut id_to_index: HashMap<String, NodeIndex> = HashMap::new();

        for department in departments {
            if !id_to_index.contains_key(&department.id) {
                let node = graph.add_node(department.id.clone());
                id_to_index.insert(department.id.clone(), node);
            }
        }

        // Edges: parent -> child. Unknown parents leave the child as a root.
        for department in departments {
            let Some(parent_id) = department.parent_department_id.as_deref() else {
                continue;
            };
            if let (Some(&parent), Some(&child)) =
                (id_to_index.get(parent_id), id_to_index.get(&department.id))
            {
                graph.add_edge(parent, child, ());
            }
        }

        Self { graph, id_to_index }
    }

    pub fn contains(&self, department_id: &str) -> bool {
        self.id_to_index.contains_key(department_id)
    }

    fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        // petgraph yields the most recently added edge first.
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        children.reverse();
        children
    }

    /// Every department below `department_id`. Each department lists its
    /// direct children in input order, then each child's subtree in turn.
    /// Walks an explicit stack, so depth is unbounded and cycles terminate.
    pub fn sub_department_ids(&self, department_id: &str) -> Vec<String> {
        let Some(&root) = self.id_to_index.get(department_id) else {
            return Vec::new();
        };

        let mut visited: HashSet<NodeIndex> = HashSet::from([root]);
        let mut stack: Vec<NodeIndex> = vec![root];
        let mut found = Vec::new();

        while let Some(node) = stack.pop() {
            let fresh: Vec<NodeIndex> = self
                .children(node)
                .into_iter()
                .filter(|child| visited.insert(*child))
                .collect();
            found.extend(fresh.iter().map(|child| self.graph[*child].clone()));
            stack.extend(fresh.into_iter().rev());
        }
        found
    }

    /// Employees assigned to `department_id`, optionally including every
    /// sub-department, in input order.
    pub fn employees_in<'a>(
        &self,
        department_id: &str,
        employees: &'a [Employee],
        include_sub_departments: bool,
    ) -> Vec<&'a Employee> {
        if !self.contains(department_id) {
            return Vec::new();
        }
        let mut scope: HashSet<String> = HashSet::from([department_id.to_string()]);
        if include_sub_departments {
            scope.extend(self.sub_department_ids(department_id));
        }
        employees
            .iter()
            .filter(|employee| {
                employee
                    .department_id
                    .as_ref()
                    .is_some_and(|dept| scope.contains(dept))
            })
            .collect()
    }
}
