use flowedit::store::{self, Operation, Selection, StackLayout};
use flowedit::svg::Theme;
use flowedit::{codec, templates, Direction, ExportOptions, FlowGraph, NodeKind, Position, SvgOptions};
use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;
use tracing::warn;
use tracing::level_filters::LevelFilter;

const HELP: &str = "\
flowedit - Edit flowchart graphs and render them to SVG or Mermaid

Usage: flowedit [OPTIONS] <COMMAND> [ARGS]

Reads the current graph as JSON from stdin (empty stdin = empty graph).
Editing commands print the new graph as JSON.

Commands:
  render                              Print the graph as SVG
  export                              Print the graph as Mermaid
  add <label>                         Append a process node
  add-node <kind> <label> <x> <y>     Append a node of the given kind
  connect <source,target,label>       Append an edge
  edit <node|edge> <id> <text>        Relabel a node or edge
  delete-node <id>                    Remove a node and its edges
  delete-edge <id>                    Remove an edge
  apply <operation-json>              Apply a structured operation
  clear                               Print the empty graph
  example                             Print the demo graph
  sketch <text>                       Outline a process from text
  schema                              Print the graph JSON shape

Options:
  -h, --help           Show this help message
  -v, --verbose        Log diagnostics to stderr
      --dark           Use the dark palette for SVG
      --theme NAME     SVG palette (light, dark)
      --direction DIR  Mermaid direction (TD, TB, LR, BT, RL)
      --strict         Fail instead of returning the graph unchanged

Example:
  flowedit example | flowedit connect '4,1,Again' | flowedit export";

#[derive(Debug)]
struct Cli {
    verbose: bool,
    strict: bool,
    theme: Theme,
    direction: Direction,
    args: Vec<String>,
}

/// Parses the arguments that follow the program name.
fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Cli, String> {
    let mut cli = Cli {
        verbose: false,
        strict: false,
        theme: Theme::Light,
        direction: Direction::TD,
        args: Vec::new(),
    };
    let mut iter = argv.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => cli.verbose = true,
            "--strict" => cli.strict = true,
            "--dark" => cli.theme = Theme::Dark,
            "--theme" => {
                let value = iter.next().ok_or("--theme needs a value")?;
                cli.theme = Theme::from_str(&value);
            }
            "--direction" => {
                let value = iter.next().ok_or("--direction needs a value")?;
                cli.direction =
                    Direction::from_str(&value).ok_or_else(|| format!("Invalid direction: {}", value))?;
            }
            _ => cli.args.push(arg),
        }
    }
    Ok(cli)
}

/// What a command produced: stdout text, plus an optional status line for stderr
#[derive(Debug, PartialEq)]
struct Report {
    output: String,
    status: Option<String>,
}

impl Report {
    fn output(output: String) -> Self {
        Self { output, status: None }
    }
}

fn read_stdin() -> Result<String, String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .map_err(|e| format!("Failed to read from stdin: {}", e))?;
    Ok(buf)
}

/// Blank input is the empty graph; unusable input is too, with a warning.
fn load_graph(text: &str) -> FlowGraph {
    if text.trim().is_empty() {
        return FlowGraph::new();
    }
    match codec::try_decode_graph(text) {
        Ok(graph) => graph,
        Err(e) => {
            warn!(error = %e, "ignoring unusable input graph");
            FlowGraph::new()
        }
    }
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, String> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing argument: {}", name))
}

fn number(text: &str) -> Result<f64, String> {
    text.parse().map_err(|_| format!("Not a number: {}", text))
}

/// Runs an edit; in strict mode a no-op or rejection becomes an error.
fn edit(
    strict: bool,
    graph: &FlowGraph,
    result: Result<FlowGraph, flowedit::StoreError>,
) -> Result<String, String> {
    match result {
        Ok(next) => Ok(codec::encode_graph(&next)),
        Err(e) if strict => Err(e.to_string()),
        Err(e) => {
            warn!(error = %e, "graph unchanged");
            Ok(codec::encode_graph(graph))
        }
    }
}

/// Runs one command. `input` supplies the current graph's JSON and is only
/// read by commands that need a graph.
fn run(cli: &Cli, input: impl FnOnce() -> Result<String, String>) -> Result<Report, String> {
    let args = &cli.args;
    let command = arg(args, 0, "command")?;
    let svg_options = SvgOptions {
        theme: cli.theme,
        ..Default::default()
    };
    let export_options = ExportOptions {
        direction: cli.direction,
    };

    match command {
        "example" => return Ok(Report::output(codec::encode_graph(&templates::example_flowchart()))),
        "sketch" => {
            let text = args[1..].join(" ");
            return Ok(Report::output(codec::encode_graph(&templates::sketch_from_text(&text))));
        }
        "schema" => return Ok(Report::output(codec::describe_shape().to_string())),
        _ => {}
    }

    let graph = load_graph(&input()?);
    let output = match command {
        "render" => flowedit::render_svg(&graph, &svg_options),
        "export" => flowedit::export_mermaid(&graph, &export_options),
        "clear" => codec::encode_graph(&store::clear(&graph)),
        "add" => {
            let label = args.get(1).map(String::as_str);
            edit(cli.strict, &graph, store::try_add_node(&graph, label, &StackLayout::default()))?
        }
        "add-node" => {
            let kind = NodeKind::from_str(arg(args, 1, "kind")?);
            let label = arg(args, 2, "label")?;
            let position = Position::new(number(arg(args, 3, "x")?)?, number(arg(args, 4, "y")?)?);
            edit(cli.strict, &graph, store::try_add_node_with(&graph, kind, label, position))?
        }
        "connect" => {
            let spec = args.get(1).map(String::as_str);
            edit(cli.strict, &graph, store::try_connect_nodes(&graph, spec))?
        }
        "edit" => {
            let id = arg(args, 2, "id")?.to_string();
            let selection = match arg(args, 1, "node|edge")? {
                "node" => Selection::Node(id),
                "edge" => Selection::Edge(id),
                other => return Err(format!("Cannot select a {}", other)),
            };
            let text = args.get(3).map(String::as_str);
            edit(cli.strict, &graph, store::try_edit_element(&graph, &selection, text))?
        }
        "delete-node" => edit(cli.strict, &graph, store::try_delete_node(&graph, arg(args, 1, "id")?))?,
        "delete-edge" => edit(cli.strict, &graph, store::try_delete_edge(&graph, arg(args, 1, "id")?))?,
        "apply" => {
            let op = Operation::from_json(arg(args, 1, "operation")?).map_err(|e| e.to_string())?;
            return match store::try_apply_operation(&graph, &op) {
                Ok((next, message)) => Ok(Report {
                    output: codec::encode_graph(&next),
                    status: Some(message),
                }),
                Err(e) if cli.strict => Err(e.to_string()),
                Err(e) => Ok(Report {
                    output: codec::encode_graph(&graph),
                    status: Some(e.to_string()),
                }),
            };
        }
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(Report::output(output))
}

fn main() -> ExitCode {
    if std::env::args().any(|a| a == "-h" || a == "--help") {
        println!("{}", HELP);
        return ExitCode::SUCCESS;
    }

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match run(&cli, read_stdin) {
        Ok(report) => {
            if let Some(status) = report.status {
                eprintln!("{}", status);
            }
            println!("{}", report.output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(argv: &[&str]) -> Cli {
        parse_args(argv.iter().map(|a| a.to_string())).unwrap()
    }

    fn stdin(text: &str) -> impl FnOnce() -> Result<String, String> + '_ {
        move || Ok(text.to_string())
    }

    fn two_nodes() -> String {
        let g = store::add_node(&FlowGraph::new(), Some("Start"));
        codec::encode_graph(&store::add_node(&g, Some("End")))
    }

    #[test]
    fn test_parse_options() {
        let parsed = cli(&["--strict", "--theme", "dark", "--direction", "lr", "export"]);
        assert!(parsed.strict);
        assert!(!parsed.verbose);
        assert_eq!(parsed.theme, Theme::Dark);
        assert_eq!(parsed.direction, Direction::LR);
        assert_eq!(parsed.args, vec!["export"]);

        assert_eq!(cli(&["--theme", "sepia", "render"]).theme, Theme::Light);
        assert_eq!(cli(&["--dark", "render"]).theme, Theme::Dark);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let bad = |argv: &[&str]| parse_args(argv.iter().map(|a| a.to_string())).unwrap_err();
        assert_eq!(bad(&["--direction", "XY"]), "Invalid direction: XY");
        assert_eq!(bad(&["--direction"]), "--direction needs a value");
        assert_eq!(bad(&["--theme"]), "--theme needs a value");
    }

    #[test]
    fn test_malformed_connect_returns_graph_unchanged() {
        let input = two_nodes();
        let report = run(&cli(&["connect", "1,2"]), stdin(&input)).unwrap();
        assert_eq!(report.output, input);
        assert_eq!(report.status, None);
    }

    #[test]
    fn test_strict_malformed_connect_fails() {
        let input = two_nodes();
        let err = run(&cli(&["--strict", "connect", "1,2"]), stdin(&input)).unwrap_err();
        assert!(err.contains("2 field"), "{}", err);
        assert!(run(&cli(&["--strict", "add", ""]), stdin(&input)).is_err());
    }

    #[test]
    fn test_apply_reports_status_separately() {
        let input = two_nodes();
        let op = r#"{"operation":"connect_nodes","edge":{"source":"1","target":"2","label":"Yes"}}"#;
        let report = run(&cli(&["apply", op]), stdin(&input)).unwrap();
        assert_eq!(report.status.as_deref(), Some("Connected node 1 to node 2"));
        let graph = codec::decode_graph(Some(&report.output));
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_apply_rejection_is_status_unless_strict() {
        let input = two_nodes();
        let op = r#"{"operation":"delete_node","node_id":"9"}"#;
        let report = run(&cli(&["apply", op]), stdin(&input)).unwrap();
        assert_eq!(report.output, input);
        assert_eq!(report.status.as_deref(), Some("Node 9 not found"));
        assert!(run(&cli(&["--strict", "apply", op]), stdin(&input)).is_err());
    }

    #[test]
    fn test_graph_free_commands_skip_input() {
        let report = run(&cli(&["example"]), || Err("stdin touched".to_string())).unwrap();
        assert_eq!(codec::decode_graph(Some(&report.output)), templates::example_flowchart());
    }

    #[test]
    fn test_unusable_input_is_empty_graph() {
        assert_eq!(load_graph("  \n"), FlowGraph::new());
        assert_eq!(load_graph("[1, 2]"), FlowGraph::new());
        let report = run(&cli(&["clear"]), stdin("not json")).unwrap();
        assert_eq!(codec::decode_graph(Some(&report.output)), FlowGraph::new());
    }
}
