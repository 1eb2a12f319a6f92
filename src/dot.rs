//! Reading workflow graphs from a subset of the Graphviz DOT language.
//!
//! Node names are mapped to dense vertex ids in order of first appearance. Numeric attributes
//! named by [`DotAttributes`] become vertex costs, edge weights and marks; anything else is
//! ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::graph::{Graph, VertexId};

#[derive(Debug, Error)]
pub enum DotError {
    #[error("could not read graph file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected {expected}, found {found}")]
    Unexpected {
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEnd { line: usize, expected: &'static str },
    #[error("line {line}: attribute `{name}` has non-numeric value `{value}`")]
    InvalidNumber {
        line: usize,
        name: String,
        value: String,
    },
}

/// Names of the DOT attributes holding costs. An empty name disables that attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DotAttributes {
    /// Node attribute with the time cost.
    pub time_label: String,
    /// Node attribute with the memory cost, also the edge attribute with the weight.
    pub weight_label: String,
    /// Edge attribute telling whether an edge is a computation (marked) edge.
    pub computation_label: String,
}

impl Default for DotAttributes {
    fn default() -> Self {
        Self {
            time_label: String::new(),
            weight_label: "size".to_string(),
            computation_label: String::new(),
        }
    }
}

pub fn read_graph_from_file(
    path: impl AsRef<Path>,
    attributes: &DotAttributes,
) -> Result<Graph, DotError> {
    let text = fs::read_to_string(path.as_ref())?;
    let graph = parse_graph(&text, attributes)?;
    debug!(
        path = %path.as_ref().display(),
        vertices = graph.n_vertices(),
        edges = graph.n_edges(),
        "read graph file"
    );
    Ok(graph)
}

/// Parses DOT `text`; source and target are discovered afterwards.
pub fn parse_graph(text: &str, attributes: &DotAttributes) -> Result<Graph, DotError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        position: 0,
        attributes,
        ids: HashMap::new(),
        graph: Graph::new(),
    };
    parser.parse()?;

    let mut graph = parser.graph;
    graph.find_source();
    graph.find_target();
    Ok(graph)
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Id(String),
    Arrow,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Equals,
    Separator,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Id(id) => format!("`{id}`"),
            Token::Arrow => "`->`".to_string(),
            Token::OpenBrace => "`{`".to_string(),
            Token::CloseBrace => "`}`".to_string(),
            Token::OpenBracket => "`[`".to_string(),
            Token::CloseBracket => "`]`".to_string(),
            Token::Equals => "`=`".to_string(),
            Token::Separator => "`;`".to_string(),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, DotError> {
    let mut tokens = vec![];
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '#' => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = ' ';
                loop {
                    match chars.next() {
                        Some('/') if previous == '*' => break,
                        Some(c) => {
                            if c == '\n' {
                                line += 1;
                            }
                            previous = c;
                        }
                        None => {
                            return Err(DotError::UnexpectedEnd {
                                line,
                                expected: "`*/`",
                            })
                        }
                    }
                }
            }
            '-' if chars.peek() == Some(&'>') || chars.peek() == Some(&'-') => {
                chars.next();
                tokens.push((Token::Arrow, line));
            }
            '{' => tokens.push((Token::OpenBrace, line)),
            '}' => tokens.push((Token::CloseBrace, line)),
            '[' => tokens.push((Token::OpenBracket, line)),
            ']' => tokens.push((Token::CloseBracket, line)),
            '=' => tokens.push((Token::Equals, line)),
            ';' | ',' => tokens.push((Token::Separator, line)),
            '"' => {
                let start = line;
                let mut id = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => {
                            if let Some(escaped) = chars.next() {
                                id.push(escaped);
                            }
                        }
                        Some(c) => {
                            if c == '\n' {
                                line += 1;
                            }
                            id.push(c);
                        }
                        None => {
                            return Err(DotError::UnexpectedEnd {
                                line,
                                expected: "closing `\"`",
                            })
                        }
                    }
                }
                tokens.push((Token::Id(id), start));
            }
            c if is_id_char(c) || (c == '-' && chars.peek().is_some_and(|n| is_id_char(*n))) => {
                let mut id = c.to_string();
                while let Some(c) = chars.next_if(|&c| is_id_char(c)) {
                    id.push(c);
                }
                tokens.push((Token::Id(id), line));
            }
            other => {
                return Err(DotError::Unexpected {
                    line,
                    expected: "a DOT token",
                    found: format!("`{other}`"),
                })
            }
        }
    }

    Ok(tokens)
}

fn is_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

struct Parser<'a> {
    tokens: Vec<(Token, usize)>,
    position: usize,
    attributes: &'a DotAttributes,
    ids: HashMap<String, VertexId>,
    graph: Graph,
}

impl Parser<'_> {
    fn parse(&mut self) -> Result<(), DotError> {
        if self.peek_keyword("strict") {
            self.position += 1;
        }
        match self.next("`digraph`")? {
            Token::Id(kind) if kind == "digraph" || kind == "graph" => {}
            other => return Err(self.unexpected("`digraph`", &other)),
        }
        if let Some(Token::Id(_)) = self.peek() {
            self.position += 1;
        }
        self.expect(Token::OpenBrace, "`{`")?;

        loop {
            match self.next("a statement or `}`")? {
                Token::CloseBrace => return Ok(()),
                Token::Separator => {}
                Token::Id(name) => self.statement(name)?,
                other => return Err(self.unexpected("a statement or `}`", &other)),
            }
        }
    }

    fn statement(&mut self, name: String) -> Result<(), DotError> {
        match name.as_str() {
            "graph" | "node" | "edge" if self.peek() == Some(&Token::OpenBracket) => {
                // default attribute lists don't carry per-vertex costs
                self.attribute_list()?;
                return Ok(());
            }
            _ => {}
        }

        match self.peek() {
            Some(Token::Equals) => {
                self.position += 1;
                self.identifier("an attribute value")?;
                Ok(())
            }
            Some(Token::Arrow) => self.edge_statement(name),
            _ => self.node_statement(name),
        }
    }

    fn node_statement(&mut self, name: String) -> Result<(), DotError> {
        let line = self.line();
        let vertex = self.vertex(&name);
        let attributes = self.attribute_list()?;

        let time = self.number(&attributes, &self.attributes.time_label, line)?;
        let memory = self.number(&attributes, &self.attributes.weight_label, line)?;
        let v = self.graph.vertex_mut(vertex);
        if let Some(time) = time {
            v.time = time;
        }
        if let Some(memory) = memory {
            v.memory = memory;
        }
        Ok(())
    }

    fn edge_statement(&mut self, name: String) -> Result<(), DotError> {
        let line = self.line();
        let mut chain = vec![self.vertex(&name)];
        while self.peek() == Some(&Token::Arrow) {
            self.position += 1;
            let next = self.identifier("a node name")?;
            chain.push(self.vertex(&next));
        }
        let attributes = self.attribute_list()?;

        let weight = self
            .number(&attributes, &self.attributes.weight_label, line)?
            .unwrap_or(0.0);
        let marked = self
            .number(&attributes, &self.attributes.computation_label, line)?
            .is_some_and(|flag| flag != 0.0);
        for pair in chain.windows(2) {
            self.graph.add_edge(pair[0], pair[1], weight, marked);
        }
        Ok(())
    }

    /// Zero or more `[k=v, ...]` blocks.
    fn attribute_list(&mut self) -> Result<HashMap<String, String>, DotError> {
        let mut attributes = HashMap::new();
        while self.peek() == Some(&Token::OpenBracket) {
            self.position += 1;
            loop {
                match self.next("an attribute or `]`")? {
                    Token::CloseBracket => break,
                    Token::Separator => {}
                    Token::Id(key) => {
                        let value = if self.peek() == Some(&Token::Equals) {
                            self.position += 1;
                            self.identifier("an attribute value")?
                        } else {
                            "true".to_string()
                        };
                        attributes.insert(key, value);
                    }
                    other => return Err(self.unexpected("an attribute or `]`", &other)),
                }
            }
        }
        Ok(attributes)
    }

    fn number(
        &self,
        attributes: &HashMap<String, String>,
        label: &str,
        line: usize,
    ) -> Result<Option<f64>, DotError> {
        if label.is_empty() {
            return Ok(None);
        }
        let Some(value) = attributes.get(label) else {
            return Ok(None);
        };
        match value.as_str() {
            "true" => Ok(Some(1.0)),
            "false" => Ok(Some(0.0)),
            text => text
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| DotError::InvalidNumber {
                    line,
                    name: label.to_string(),
                    value: value.clone(),
                }),
        }
    }

    fn vertex(&mut self, name: &str) -> VertexId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.graph.add_vertex(0.0, 0.0);
        self.ids.insert(name.to_string(), id);
        id
    }

    fn identifier(&mut self, expected: &'static str) -> Result<String, DotError> {
        match self.next(expected)? {
            Token::Id(id) => Ok(id),
            other => Err(self.unexpected(expected, &other)),
        }
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<(), DotError> {
        let found = self.next(expected)?;
        if found == token {
            Ok(())
        } else {
            Err(self.unexpected(expected, &found))
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<Token, DotError> {
        match self.tokens.get(self.position) {
            Some((token, _)) => {
                self.position += 1;
                Ok(token.clone())
            }
            None => Err(DotError::UnexpectedEnd {
                line: self.line(),
                expected,
            }),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|(token, _)| token)
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Id(id)) if id == keyword)
    }

    /// Line of the current token, or of the last one at the end of input.
    fn line(&self) -> usize {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map_or(1, |(_, line)| *line)
    }

    fn unexpected(&self, expected: &'static str, found: &Token) -> DotError {
        let line = self
            .tokens
            .get(self.position.saturating_sub(1))
            .map_or(1, |(_, line)| *line);
        DotError::Unexpected {
            line,
            expected,
            found: found.describe(),
        }
    }
}
