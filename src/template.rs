//! 项目模板
//!
//! 模板是一张 路径 → 初始内容 的有序映射。宿主可以用 JSON 对象
//! 直接下发自定义模板，也可以使用内置的 React 启动模板。深层路径
//! 的中间目录在种子阶段自动补齐。

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Template {
    files: BTreeMap<String, String>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 内置 Vite + React 启动模板
    pub fn react_starter() -> Self {
        Self::new()
            .with_file(
                ".gitignore",
                "node_modules\ndist\n*.local\n",
            )
            .with_file(
                "README.md",
                "# React Starter\n\nEdit `src/App.tsx` to get started.\n",
            )
            .with_file(
                "index.html",
                "<!doctype html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"UTF-8\" />\n    <title>React Starter</title>\n  </head>\n  <body>\n    <div id=\"root\"></div>\n    <script type=\"module\" src=\"/src/main.tsx\"></script>\n  </body>\n</html>\n",
            )
            .with_file(
                "package.json",
                "{\n  \"name\": \"react-starter\",\n  \"private\": true,\n  \"type\": \"module\",\n  \"scripts\": {\n    \"dev\": \"vite\",\n    \"build\": \"tsc -b && vite build\"\n  },\n  \"dependencies\": {\n    \"react\": \"^19.0.0\",\n    \"react-dom\": \"^19.0.0\"\n  }\n}\n",
            )
            .with_file(
                "src/App.tsx",
                "import Index from \"./pages/Index\";\n\nexport default function App() {\n  return <Index />;\n}\n",
            )
            .with_file(
                "src/index.css",
                ":root {\n  font-family: system-ui, sans-serif;\n}\n\nbody {\n  margin: 0;\n}\n",
            )
            .with_file(
                "src/lib/utils.ts",
                "export function cn(...classes: (string | undefined)[]) {\n  return classes.filter(Boolean).join(\" \");\n}\n",
            )
            .with_file(
                "src/main.tsx",
                "import { createRoot } from \"react-dom/client\";\nimport App from \"./App\";\nimport \"./index.css\";\n\ncreateRoot(document.getElementById(\"root\")!).render(<App />);\n",
            )
            .with_file(
                "src/pages/Index.tsx",
                "export default function Index() {\n  return (\n    <main>\n      <h1>Hello</h1>\n    </main>\n  );\n}\n",
            )
    }
}
