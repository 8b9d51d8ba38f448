use maud::{html, Markup, PreEscaped};

use crate::models::DecisionTree;
use crate::names;

/// Admin panel: node overview table plus a raw JSON editor. Edits go through
/// the JSON API; the page script forwards the browser's Basic credentials,
/// which the edge gate has already demanded.
pub fn panel(doc: &DecisionTree, document_json: &str) -> Markup {
    html! {
        h1 { "Decision Tree Admin" }

        div id="admin-status" {}

        table {
            thead {
                tr {
                    th { "Node ID" }
                    th { "Question" }
                    th { "Type" }
                    th { "Options" }
                    th { "Actions" }
                }
            }
            tbody {
                @for node in &doc.nodes {
                    tr {
                        td { code { (node.id) } }
                        td { (node.question) }
                        td {
                            @if node.is_leaf {
                                mark { "Leaf (Result)" }
                            } @else {
                                "Question"
                            }
                        }
                        td { (node.options.len()) }
                        td {
                            @if node.id == crate::tree::ROOT_ID {
                                button."secondary" disabled { "Delete" }
                            } @else {
                                button."secondary"
                                       data-delete-node=(node.id) {
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }

        article {
            h3 { "Edit document" }
            p { "The full document as JSON. Saving replaces the stored tree wholesale." }
            textarea id="document-json" rows="24" spellcheck="false" { (document_json) }
            button id="save-document" { "Save Changes" }
        }

        (panel_script())
    }
}

fn panel_script() -> Markup {
    let script = format!(
        r#"
        function showStatus(msg, ok) {{
            const el = document.getElementById('admin-status');
            el.textContent = msg;
            el.className = ok ? 'status-ok' : 'status-err';
        }}
        document.getElementById('save-document').addEventListener('click', async () => {{
            let body;
            try {{ body = JSON.parse(document.getElementById('document-json').value); }}
            catch (e) {{ showStatus('Not valid JSON: ' + e.message, false); return; }}
            const resp = await fetch('{tree_api}', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify(body),
            }});
            if (resp.ok) {{ showStatus('Decision tree saved successfully!', true); }}
            else {{ const err = await resp.json().catch(() => ({{}})); showStatus(err.error || 'Save failed', false); }}
        }});
        for (const btn of document.querySelectorAll('[data-delete-node]')) {{
            btn.addEventListener('click', async () => {{
                const id = btn.getAttribute('data-delete-node');
                const resp = await fetch('{nodes_api}/' + encodeURIComponent(id), {{ method: 'DELETE' }});
                if (resp.ok) {{ location.reload(); }}
                else {{ const err = await resp.json().catch(() => ({{}})); showStatus(err.error || 'Delete failed', false); }}
            }});
        }}
        "#,
        tree_api = names::TREE_API_URL,
        nodes_api = names::NODES_API_URL,
    );

    html! {
        script { (PreEscaped(script)) }
    }
}
