//! Starter project shown when no workspace was ever persisted.

use crate::kernel::services::ports::NodeSnapshot;

const APP_TSX: &str = r#"import React from "react";
import Header from "./Header";
import Sidebar from "./Sidebar";

export default function App() {
  return (
    <div className="app">
      <Header title="Auris" />
      <main className="app-body">
        <Sidebar />
        <section className="content">Start editing to see changes.</section>
      </main>
    </div>
  );
}
"#;

const HEADER_TSX: &str = r#"import React from "react";

interface HeaderProps {
  title: string;
}

export default function Header({ title }: HeaderProps) {
  return (
    <header className="header">
      <h1>{title}</h1>
    </header>
  );
}
"#;

const SIDEBAR_TSX: &str = r#"import React from "react";
import { NAV_ITEMS } from "../utils/constants";

export default function Sidebar() {
  return (
    <nav className="sidebar">
      {NAV_ITEMS.map((item) => (
        <a key={item.href} href={item.href}>
          {item.label}
        </a>
      ))}
    </nav>
  );
}
"#;

const HELPERS_TS: &str = r#"export function formatDate(date: Date): string {
  return date.toISOString().slice(0, 10);
}

export function clamp(value: number, min: number, max: number): number {
  return Math.min(Math.max(value, min), max);
}
"#;

const CONSTANTS_TS: &str = r#"export const APP_NAME = "Auris";

export const NAV_ITEMS = [
  { label: "Home", href: "/" },
  { label: "Docs", href: "/docs" },
];
"#;

const INDEX_TS: &str = r#"import App from "./components/App";

export { App };
"#;

const PACKAGE_JSON: &str = r#"{
  "name": "auris-starter",
  "version": "0.1.0",
  "private": true,
  "scripts": {
    "dev": "vite",
    "build": "tsc && vite build"
  },
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0"
  }
}
"#;

const TSCONFIG_JSON: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "module": "ESNext",
    "jsx": "react-jsx",
    "strict": true
  },
  "include": ["src"]
}
"#;

const README_MD: &str = r#"# Auris Starter

A small React + TypeScript project to explore the workspace.

- `src/components` holds the UI components
- `src/utils` holds shared helpers
"#;

pub fn default_tree() -> Vec<NodeSnapshot> {
    vec![
        NodeSnapshot::folder(
            "src",
            vec![
                NodeSnapshot::folder(
                    "components",
                    vec![
                        NodeSnapshot::file("App.tsx", APP_TSX),
                        NodeSnapshot::file("Header.tsx", HEADER_TSX),
                        NodeSnapshot::file("Sidebar.tsx", SIDEBAR_TSX),
                    ],
                ),
                NodeSnapshot::folder(
                    "utils",
                    vec![
                        NodeSnapshot::file("helpers.ts", HELPERS_TS),
                        NodeSnapshot::file("constants.ts", CONSTANTS_TS),
                    ],
                ),
                NodeSnapshot::file("index.ts", INDEX_TS),
            ],
        ),
        NodeSnapshot::folder("public", vec![NodeSnapshot::file("favicon.ico", "")]),
        NodeSnapshot::file("package.json", PACKAGE_JSON),
        NodeSnapshot::file("tsconfig.json", TSCONFIG_JSON),
        NodeSnapshot::file("README.md", README_MD),
    ]
}
