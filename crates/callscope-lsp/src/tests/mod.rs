//! Tests for the LSP-backed adapter.

mod support;

use std::fs;

use callscope_graph::{
    BuildOptions, CallGraphAdapter, CallGraphBuilder, CallHierarchyItem, CallNode, GraphError,
    Location, Position, SymbolKind,
};
use camino::{Utf8Path, Utf8PathBuf};
use lsp_types::{self as lsp, CallHierarchyOutgoingCall, DocumentSymbolResponse};
use rstest::rstest;
use tempfile::TempDir;

use self::support::{ScriptedClient, flat_symbol, item, symbol};
use crate::LspCallGraphAdapter;
use crate::uri::path_to_uri;

const MAIN_PATH: &str = "/ws/src/main.ts";

fn adapter(client: ScriptedClient) -> LspCallGraphAdapter<ScriptedClient> {
    LspCallGraphAdapter::new("typescript", ["ts", "tsx"], client)
}

fn main_client() -> ScriptedClient {
    let mut client = ScriptedClient {
        prepared: vec![item("main", 0, 9)],
        ..ScriptedClient::default()
    };
    client.outgoing.insert(
        String::from("main"),
        vec![CallHierarchyOutgoingCall {
            to: item("helper", 10, 16),
            from_ranges: vec![
                lsp::Range::new(lsp::Position::new(1, 2), lsp::Position::new(1, 8)),
                lsp::Range::new(lsp::Position::new(2, 2), lsp::Position::new(2, 8)),
            ],
        }],
    );
    client
}

#[rstest]
#[case("src/app.ts", true)]
#[case("src/View.TSX", true)]
#[case("src/lib.rs", false)]
#[case("Makefile", false)]
fn claims_files_by_extension(#[case] path: &str, #[case] expected: bool) {
    let adapter = adapter(ScriptedClient::default());
    assert_eq!(adapter.supports_file(Utf8Path::new(path)), expected);
}

#[tokio::test]
async fn initialise_sends_root_uri() {
    let mut adapter = adapter(ScriptedClient::default());
    adapter
        .initialize(Utf8Path::new("/ws"))
        .await
        .expect("initialise succeeds");
    let root = adapter.client().root.as_ref().expect("root recorded");
    assert_eq!(root.as_str(), "file:///ws");
}

#[tokio::test]
async fn prepare_translates_positions_in_both_directions() {
    let mut adapter = adapter(main_client());
    let prepared = adapter
        .prepare_call_hierarchy(Utf8Path::new(MAIN_PATH), Position::new(1, 10))
        .await
        .expect("prepare succeeds")
        .expect("item found");

    assert_eq!(
        adapter.client().prepare_requests,
        vec![lsp::Position::new(0, 9)]
    );
    assert_eq!(prepared.name, "main");
    assert_eq!(
        prepared.selection_location,
        Location::new(MAIN_PATH, Position::new(1, 10))
    );
    assert_eq!(prepared.location.position(), Position::new(1, 1));
    assert_eq!(prepared.detail.as_deref(), Some("function main(): void"));
}

#[tokio::test]
async fn prepare_without_result_yields_none() {
    let mut adapter = adapter(ScriptedClient::default());
    let prepared = adapter
        .prepare_call_hierarchy(Utf8Path::new(MAIN_PATH), Position::new(3, 1))
        .await
        .expect("prepare succeeds");
    assert!(prepared.is_none());
}

#[tokio::test]
async fn follow_up_requests_reuse_server_items() {
    let mut adapter = adapter(main_client());
    let prepared = adapter
        .prepare_call_hierarchy(Utf8Path::new(MAIN_PATH), Position::new(1, 10))
        .await
        .expect("prepare succeeds")
        .expect("item found");

    let calls = adapter
        .outgoing_calls(&prepared)
        .await
        .expect("outgoing calls succeed");

    assert_eq!(adapter.client().sent_items, vec![item("main", 0, 9)]);
    let call = calls.first().expect("one outgoing call");
    assert_eq!(call.to.name, "helper");
    assert_eq!(
        call.to.selection_location.position(),
        Position::new(11, 17)
    );
    let starts: Vec<Position> = call.from_ranges.iter().map(|range| range.start).collect();
    assert_eq!(starts, vec![Position::new(2, 3), Position::new(3, 3)]);
}

#[tokio::test]
async fn unknown_items_are_rebuilt_from_their_location() {
    let mut adapter = adapter(ScriptedClient::default());
    let foreign = CallHierarchyItem::new(
        "orphan",
        SymbolKind::Method,
        Location::new(MAIN_PATH, Position::new(4, 3)),
    );

    let calls = adapter
        .incoming_calls(&foreign)
        .await
        .expect("incoming calls succeed");

    assert!(calls.is_empty());
    let sent = adapter.client().sent_items.first().expect("item sent");
    assert_eq!(sent.name, "orphan");
    assert_eq!(sent.kind, lsp::SymbolKind::METHOD);
    assert_eq!(sent.selection_range.start, lsp::Position::new(3, 2));
    assert_eq!(sent.uri.as_str(), "file:///ws/src/main.ts");
}

#[tokio::test]
async fn nested_symbols_flatten_to_callables() {
    let service = symbol(
        "Service",
        lsp::SymbolKind::CLASS,
        0,
        vec![symbol(
            "run",
            lsp::SymbolKind::METHOD,
            1,
            vec![symbol("inner", lsp::SymbolKind::FUNCTION, 2, Vec::new())],
        )],
    );
    let client = ScriptedClient {
        symbols: Some(DocumentSymbolResponse::Nested(vec![
            service,
            symbol("config", lsp::SymbolKind::VARIABLE, 8, Vec::new()),
            symbol("main", lsp::SymbolKind::FUNCTION, 10, Vec::new()),
        ])),
        ..ScriptedClient::default()
    };
    let mut adapter = adapter(client);

    let symbols = adapter
        .file_symbols(Utf8Path::new(MAIN_PATH))
        .await
        .expect("symbols listed");

    let summary: Vec<(&str, bool)> = symbols
        .iter()
        .map(|found| (found.node.qualified_name(), found.exported))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Service.run", true),
            ("Service.run.inner", false),
            ("main", true),
        ]
    );
    let main = symbols.last().expect("main listed");
    assert_eq!(main.node.file_path(), Utf8Path::new(MAIN_PATH));
    assert_eq!(main.node.location().position(), Position::new(11, 10));
    assert_eq!(main.node.language(), "typescript");
}

#[tokio::test]
async fn flat_symbols_are_all_exported() {
    let client = ScriptedClient {
        symbols: Some(DocumentSymbolResponse::Flat(vec![
            flat_symbol("start", lsp::SymbolKind::METHOD, 4, Some("Server")),
            flat_symbol("Server", lsp::SymbolKind::CLASS, 3, None),
        ])),
        ..ScriptedClient::default()
    };
    let mut adapter = adapter(client);

    let symbols = adapter
        .file_symbols(Utf8Path::new(MAIN_PATH))
        .await
        .expect("symbols listed");

    let only = symbols.first().expect("one callable");
    assert_eq!(symbols.len(), 1);
    assert!(only.exported);
    assert_eq!(only.node.qualified_name(), "Server.start");
    assert_eq!(only.node.kind(), SymbolKind::Method);
}

#[tokio::test]
async fn flat_symbols_are_anchored_at_the_prepared_name() {
    let mut client = main_client();
    client.symbols = Some(DocumentSymbolResponse::Flat(vec![flat_symbol(
        "main",
        lsp::SymbolKind::FUNCTION,
        0,
        None,
    )]));
    let mut adapter = adapter(client);

    let symbols = adapter
        .file_symbols(Utf8Path::new(MAIN_PATH))
        .await
        .expect("symbols listed");

    let main = symbols.first().expect("main listed");
    assert_eq!(main.node.location().position(), Position::new(1, 10));
    assert_eq!(
        adapter.client().prepare_requests,
        vec![lsp::Position::new(0, 2)]
    );
}

#[tokio::test]
async fn flat_symbols_without_a_prepared_item_keep_the_declaration_start() {
    let client = ScriptedClient {
        symbols: Some(DocumentSymbolResponse::Flat(vec![flat_symbol(
            "main",
            lsp::SymbolKind::FUNCTION,
            0,
            None,
        )])),
        ..ScriptedClient::default()
    };
    let mut adapter = adapter(client);

    let symbols = adapter
        .file_symbols(Utf8Path::new(MAIN_PATH))
        .await
        .expect("symbols listed");

    let main = symbols.first().expect("main listed");
    assert_eq!(main.node.location().position(), Position::new(1, 3));
}

#[tokio::test]
async fn whole_file_build_over_flat_symbols_keeps_one_node_per_function() {
    let dir = TempDir::new().expect("temp dir");
    let path = Utf8PathBuf::try_from(dir.path().join("main.ts")).expect("utf-8 path");
    fs::write(&path, "export function main() { helper(); }\n").expect("write source");
    let file_uri = path_to_uri(&path).expect("absolute path converts");

    let mut main = item("main", 0, 16);
    main.uri = file_uri.clone();
    let mut helper = item("helper", 10, 16);
    helper.uri = file_uri.clone();
    let mut listed = flat_symbol("main", lsp::SymbolKind::FUNCTION, 0, None);
    listed.location.uri = file_uri;
    listed.location.range.start = lsp::Position::new(0, 0);

    let mut client = ScriptedClient {
        prepared: vec![main],
        symbols: Some(DocumentSymbolResponse::Flat(vec![listed])),
        ..ScriptedClient::default()
    };
    client.outgoing.insert(
        String::from("main"),
        vec![CallHierarchyOutgoingCall {
            to: helper,
            from_ranges: vec![lsp::Range::new(
                lsp::Position::new(0, 25),
                lsp::Position::new(0, 31),
            )],
        }],
    );
    let mut builder = CallGraphBuilder::new();
    builder.register_adapter(Box::new(adapter(client)));

    let graph = builder
        .build(&BuildOptions::new([path.as_str()]))
        .await
        .expect("build succeeds");

    let mut names: Vec<&str> = graph.nodes().map(CallNode::name).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["helper", "main"]);
    let entry = graph.entry_points().first().expect("main is an entry point");
    assert_eq!(entry.as_str(), format!("{path}:1:17:main"));
    let callees: Vec<&str> = graph
        .outgoing_edges(entry)
        .iter()
        .filter_map(|call| graph.node(call.callee()))
        .map(CallNode::name)
        .collect();
    assert_eq!(callees, vec!["helper"]);
}

#[tokio::test]
async fn client_failures_become_adapter_errors() {
    let client = ScriptedClient {
        failing: true,
        ..ScriptedClient::default()
    };
    let mut adapter = adapter(client);

    let error = adapter
        .file_symbols(Utf8Path::new(MAIN_PATH))
        .await
        .expect_err("request fails");

    assert_eq!(
        error,
        GraphError::adapter(
            "typescript",
            "language server request failed: server crashed"
        )
    );
}

#[tokio::test]
async fn shutdown_reaches_the_client() {
    let mut adapter = adapter(main_client());
    adapter.shutdown().await.expect("shutdown succeeds");
    assert_eq!(adapter.client().shutdowns, 1);
}
