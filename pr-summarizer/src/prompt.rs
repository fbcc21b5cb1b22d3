//! Prompt templates and builders.
//!
//! Instruction templates are fixed Japanese text; the builders only assemble
//! diff payloads around them. The character-budget check lives in the
//! completion adapter, not here.

use crate::host::CommitFile;

/// Shared preamble explaining the git-diff format, prepended to the file- and
/// commit-level instruction templates.
pub const SHARED_PROMPT: &str = "あなたは優秀なプログラマーであり、git diff の要約を作成しようとしています。\n\
git diff の形式について：\n\
各ファイルにはメタデータ行が数行あります。例：\n\
```\n\
diff --git a/lib/index.js b/lib/index.js\n\
index aadf691..bfef603 100644\n\
--- a/lib/index.js\n\
+++ b/lib/index.js\n\
```\n\
これは `lib/index.js` が変更されたことを意味します。これはあくまで一例です。\n\
その後に、変更された行の指定が続きます。\n\
`+` で始まる行は追加された行です。\n\
`-` で始まる行は削除された行です。\n\
`+` でも `-` でもない行は文脈のためのコードであり、diff の一部ではありません。\n";

const FILE_SUMMARY_RULES: &str = "次に示すのは、1つのファイルに対する git diff です。\n\
この差分で行われた変更内容を高レベルで説明するコメントを作成してください。\n\
\n\
以下の形式で出力してください：\n\
\n\
    要約: と書いてから、その差分で行われた変更点の要約を箇条書きで記述してください。\n\
\n\
    各箇条書きは * で始めてください。\n\
\n\
**必ず日本語で出力してください。英語は絶対に使用せず、すべての出力を日本語のみにしてください。**\n\
\n\
例：\n\
\n\
要約:\n\
* 関数の引数に新しいオプション `timeout` を追加\n\
* 不要なログ出力を削除\n\
* コメントを英語から日本語に変更\n\
\n\
この形式で、指定された差分の要約を書いてください。\n";

const COMMIT_SUMMARY_RULES: &str = "最初のファイルの git diff の後には空行があり、その後に次のファイルの git diff が続きます。\n\
\n\
1つまたは2つのファイルの変更に関するコメントには、\n\
コメントの末尾に [path/to/modified/python/file.py], [path/to/another/file.json]\n\
のようにファイル名を追加してください。\n\
変更されたファイルが3つ以上ある場合は、ファイル名をその形式で付けないでください。\n\
\n\
ファイル名はコメント内の他の場所に含めず、必ず指定された形式で末尾にのみ記載してください。\n\
また、`[` や `]` の文字は上記以外の目的では使用しないでください。\n\
\n\
各コメントは新しい行に記載してください。\n\
コメントはすべて箇条書きとし、各行の先頭に `*` を付けてください。\n\
\n\
コメントにはコード内のコメントをそのままコピーして含めてはいけません。\n\
出力は読みやすさを最優先とし、コメントの数は少なめにして重要な点のみに絞ってください。\n\
迷ったら書かない方が良いです。\n\
\n\
**読みやすさが最も重要です。**\n\
\n\
diff に関して本当に重要な点だけを記述してください。\n\
\n\
**必ず日本語で出力してください。英語は使用せず、すべての出力を日本語のみにしてください。**\n";

/// PR-level synthesis instruction; asks for a terse high-level digest that
/// does not repeat the per-commit/per-file inputs verbatim.
pub const PR_SUMMARY_SYSTEM_PROMPT: &str = "あなたは優秀なプログラマーであり、プルリクエストの要約を行おうとしています。\n\
このプルリクエストに含まれるすべてのコミット、および変更されたすべてのファイルを確認しました。\n\
一部のコミット要約やファイル差分の要約に誤りが含まれている可能性があります。\n\
\n\
このプルリクエストの内容を要約してください。\n\
\n\
    箇条書きで出力してください。各項目の先頭には「*」を付けてください。\n\
\n\
    高レベルな説明を行ってください。コミット要約やファイル要約の繰り返しは避けてください。\n\
\n\
    最も重要なポイントだけを記載してください。箇条書きの数は数項目にとどめてください。\n";

/// System instruction for single-file summaries.
pub fn file_summary_system_prompt() -> String {
    format!("{SHARED_PROMPT}\n{FILE_SUMMARY_RULES}")
}

/// System instruction for commit-level summaries.
pub fn commit_summary_system_prompt() -> String {
    format!("{SHARED_PROMPT}\n{COMMIT_SUMMARY_RULES}")
}

/// User prompt for one file's diff.
pub fn file_diff_prompt(filename: &str, patch: &str) -> String {
    format!("要約するための {filename} の GIT DIFF：\n```\n{patch}\n```\n\n要約:\n")
}

/// Renders one file of a commit diff: two-line path header, raw patch body,
/// blank-line separator.
pub fn format_git_diff(filename: &str, patch: &str) -> String {
    format!("--- a/{filename}\n+++ b/{filename}\n{patch}\n")
}

/// User prompt for a whole commit: per-file diffs concatenated in the order
/// the hosting API reported them.
pub fn commit_diff_prompt(files: &[CommitFile]) -> String {
    let raw = files
        .iter()
        .map(|f| format_git_diff(&f.filename, f.patch.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join("\n");
    format!("THE GIT DIFF TO BE SUMMARIZED:\n```\n{raw}\n```\n\nTHE SUMMARY:\n")
}

/// User prompt for the PR-level synthesis.
pub fn pr_prompt(commits_string: &str, files_string: &str) -> String {
    format!(
        "THE COMMIT SUMMARIES:\n```\n{commits_string}\n```\n\n\
         THE FILE SUMMARIES:\n```\n{files_string}\n```\n\n\
         Reminder - write only the most important points. No more than a few bullet points.\n\
         THE PULL REQUEST SUMMARY:\n"
    )
}
