//! 多行 INSERT 语句生成

use std::fmt::Write;

/// 把 `template` 中的 `{}` 替换为 `rows` 组占位符
///
/// 每组 `row_width` 个参数，编号从 `$1` 连续递增：
/// `rows = 2, row_width = 2` 得到 `($1, $2), ($3, $4)`。
/// 没有行时返回 `None`，调用方不应执行任何语句。
pub fn bulk_insert_sql(template: &str, row_width: usize, rows: usize) -> Option<String> {
    if rows == 0 || row_width == 0 {
        return None;
    }

    let mut values = String::with_capacity(rows * row_width * 6);
    let mut param = 1;
    for row in 0..rows {
        if row > 0 {
            values.push_str(", ");
        }
        values.push('(');
        for col in 0..row_width {
            if col > 0 {
                values.push_str(", ");
            }
            let _ = write!(values, "${}", param);
            param += 1;
        }
        values.push(')');
    }

    Some(template.replacen("{}", &values, 1))
}
