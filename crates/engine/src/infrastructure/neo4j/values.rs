//! Conversions between graphwire values and Bolt values.

use graphwire_domain::{
    NodeId, NodeState, PropertyValue, RelationshipId, RelationshipState, Row, RowValue, Statement,
};
use neo4rs::{BoltNull, BoltType, Node, Query, Relation};

/// Decode one property through a typed `get`, trying scalar kinds before lists.
macro_rules! decode_property {
    ($source:expr, $key:expr) => {{
        let source = $source;
        let key: &str = $key;
        if let Ok(v) = source.get::<bool>(key) {
            PropertyValue::Bool(v)
        } else if let Ok(v) = source.get::<i64>(key) {
            PropertyValue::Int(v)
        } else if let Ok(v) = source.get::<f64>(key) {
            PropertyValue::Float(v)
        } else if let Ok(v) = source.get::<String>(key) {
            PropertyValue::String(v)
        } else if let Ok(v) = source.get::<Vec<String>>(key) {
            PropertyValue::from(v)
        } else if let Ok(v) = source.get::<Vec<i64>>(key) {
            PropertyValue::from(v)
        } else if let Ok(v) = source.get::<Vec<f64>>(key) {
            PropertyValue::from(v)
        } else if let Ok(v) = source.get::<Vec<bool>>(key) {
            PropertyValue::from(v)
        } else {
            PropertyValue::Null
        }
    }};
}

pub(crate) fn to_bolt(value: &PropertyValue) -> BoltType {
    match value {
        PropertyValue::Null => BoltType::Null(BoltNull),
        PropertyValue::Bool(b) => BoltType::from(*b),
        PropertyValue::Int(i) => BoltType::from(*i),
        PropertyValue::Float(x) => BoltType::from(*x),
        PropertyValue::String(s) => BoltType::from(s.clone()),
        PropertyValue::List(items) => BoltType::from(items.iter().map(to_bolt).collect::<Vec<_>>()),
    }
}

pub(crate) fn to_query(statement: &Statement) -> Query {
    statement
        .params
        .iter()
        .fold(neo4rs::query(&statement.text), |query, (name, value)| {
            query.param(name, to_bolt(value))
        })
}

pub(crate) fn node_state(node: &Node) -> NodeState {
    let mut state = NodeState::new().with_id(NodeId::new(node.id()));
    for label in node.labels() {
        state = state.with_label(label.to_string());
    }
    for key in node.keys() {
        let key = key.to_string();
        let value = decode_property!(node, key.as_str());
        state.properties.insert(key, value);
    }
    state
}

pub(crate) fn relationship_state(rel: &Relation) -> RelationshipState {
    let mut state = RelationshipState::new(
        rel.typ().to_string(),
        NodeId::new(rel.start_node_id()),
        NodeId::new(rel.end_node_id()),
    )
    .with_id(RelationshipId::new(rel.id()));
    for key in rel.keys() {
        let key = key.to_string();
        let value = decode_property!(rel, key.as_str());
        state.properties.insert(key, value);
    }
    state
}

pub(crate) fn decode_row(row: &neo4rs::Row) -> Row {
    let mut decoded = Row::new();
    for column in row.keys() {
        let column = column.to_string();
        let value = if let Ok(node) = row.get::<Node>(&column) {
            RowValue::Node(node_state(&node))
        } else if let Ok(rel) = row.get::<Relation>(&column) {
            RowValue::Relationship(relationship_state(&rel))
        } else {
            RowValue::Value(decode_property!(row, column.as_str()))
        };
        decoded.push(column, value);
    }
    decoded
}
