//! Default scaffold files.
//!
//! Every editing session starts from this minimal runnable React tree.
//! Loaded or generated files are merged over it, so the editor always has
//! a complete file set even when storage is empty or partially corrupt.

use super::model::FileSet;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Generated App</title>
    <script src="https://cdn.tailwindcss.com"></script>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/index.js"></script>
  </body>
</html>
"#;

const INDEX_JS: &str = r#"import React from "react";
import { createRoot } from "react-dom/client";
import App from "./App";
import "./App.css";

createRoot(document.getElementById("root")).render(<App />);
"#;

const APP_JS: &str = r#"import React from "react";

export default function App() {
  return (
    <div className="flex min-h-screen items-center justify-center">
      <h1 className="text-2xl font-semibold">Describe the app you want to build.</h1>
    </div>
  );
}
"#;

const APP_CSS: &str = r#"body {
  margin: 0;
  font-family: system-ui, sans-serif;
}
"#;

/// Returns the default scaffold file set.
pub fn default_scaffold() -> FileSet {
    let mut files = FileSet::new();
    files.insert("/index.html", INDEX_HTML);
    files.insert("/index.js", INDEX_JS);
    files.insert("/App.js", APP_JS);
    files.insert("/App.css", APP_CSS);
    files
}
