use crate::ledmap::CompactLedmap;

/// C declarations that take the place of the dense color table. Layer `n` of
/// the sparse arrays is the `n`th record of the source table.
pub fn declarations(table: &CompactLedmap) -> Vec<String> {
    let mut lines = Vec::new();

    let layer_map = join(table.layer_map.iter().map(u8::to_string));
    lines.push(format!(
        "const uint8_t PROGMEM led_layer_map[{}] = {{ {} }};",
        table.layer_map.len(),
        layer_map
    ));

    lines.push(format!(
        "const uint8_t PROGMEM ledmap_distinct_colors[{}][3] = {{",
        table.distinct_colors.len()
    ));
    for color in &table.distinct_colors {
        lines.push(format!("    {color},"));
    }
    lines.push("};".to_owned());
    lines.push(String::new());

    lines.push(
        "typedef struct { uint8_t index; uint8_t distinct_color; } index_color_tuple;".to_owned(),
    );
    lines.push(String::new());

    for (position, entries) in table.layers.iter().enumerate() {
        let entries = join(
            entries
                .iter()
                .map(|entry| format!("{{ {}, {} }}", entry.led, entry.color)),
        );
        lines.push(format!(
            "const index_color_tuple PROGMEM ledmap_indirect_{position}[] = {{ {entries} }};"
        ));
        lines.push(String::new());
    }

    lines.push("const index_color_tuple *const PROGMEM ledmap_indirect_sparse[] = {".to_owned());
    for position in 0..table.layers.len() {
        lines.push(format!("    &ledmap_indirect_{position}[0],"));
    }
    lines.push("};".to_owned());
    lines.push(String::new());

    lines
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;
    use crate::ledmap::LayerRecord;
    use crate::types::Color;

    #[test]
    fn emits_all_tables() {
        let records = [
            LayerRecord {
                layer_id: 0,
                colors: vec![Color(0, 0, 0), Color(5, 5, 5), Color(10, 255, 255)],
            },
            LayerRecord {
                layer_id: 3,
                colors: vec![Color(5, 5, 5), Color(0, 0, 0), Color(0, 0, 0)],
            },
        ];
        let table = CompactLedmap::build(&records).unwrap();

        let expected = "\
const uint8_t PROGMEM led_layer_map[4] = { 0, 0, 0, 1 };
const uint8_t PROGMEM ledmap_distinct_colors[2][3] = {
    {5, 5, 5},
    {10, 255, 255},
};

typedef struct { uint8_t index; uint8_t distinct_color; } index_color_tuple;

const index_color_tuple PROGMEM ledmap_indirect_0[] = { { 1, 0 }, { 2, 1 }, { 255, 255 } };

const index_color_tuple PROGMEM ledmap_indirect_1[] = { { 0, 0 }, { 255, 255 } };

const index_color_tuple *const PROGMEM ledmap_indirect_sparse[] = {
    &ledmap_indirect_0[0],
    &ledmap_indirect_1[0],
};
";
        assert_eq!(declarations(&table).join("\n").as_str(), expected);
    }

    #[test]
    fn empty_table_has_no_layer_arrays() {
        let table = CompactLedmap::build(&[]).unwrap();
        let lines = declarations(&table);

        assert_eq!(lines[0].as_str(), "const uint8_t PROGMEM led_layer_map[0] = {  };");
        assert!(!lines.iter().any(|line| line.contains("ledmap_indirect_0")));
    }
}
