//! Build, write and re-read complete documents.

use mtlx::prelude::*;

fn outcolor_transparency_aovset() -> Element {
    Element::aov_set("outColorTransparency")
        .with_child(Element::aov("outColor", "color3"))
        .with_child(Element::aov("outTransparency", "color3"))
}

fn surface_network(doc: &mut Document) {
    let mut place2d = Element::shader("place2dTexture1", "utility", "place2dTexture")
        .with_child(Element::parameter("repeatUV", "vector2", "8,8"));
    place2d.set("aovset", "outUV").unwrap();

    let mut uv = Element::coshader("uvCoord", "place2dTexture1");
    uv.set("aovset", "outUV").unwrap();
    let mut noise = Element::shader("noise1", "utility", "noise")
        .with_child(Element::parameter("amplitude", "float", "0.5"))
        .with_child(uv);
    noise.set("aovset", "outColor").unwrap();

    let mut incandescence = Element::coshader("incandescence", "noise1");
    incandescence.set("aovset", "outColor").unwrap();
    let mut lambert = Element::shader("lambert1", "surface", "lambert")
        .with_child(Element::parameter("color", "color3", "0.5,0.3,0.1"))
        .with_child(incandescence);
    lambert.set("aovset", "outColorTransparency").unwrap();
    lambert.set("xpos", "120.5").unwrap();

    doc.insert(place2d);
    doc.insert(noise);
    doc.insert(lambert);
}

fn scene_document() -> Document {
    let mut doc = Document::new()
        .with(Element::collection("xyzCol").with_child(Element::collection_add(
            "xyzColAdd",
            "/pCube1/pCubeShape1,/pSphere1/pSphereShape1",
        )))
        .with(Element::geom_info("gi1").with_child(Element::geom_attr("txtid", "integer", "1001")))
        .with(Element::aov_set("outColor").with_child(Element::aov("outColor", "color3")))
        .with(outcolor_transparency_aovset())
        .with(Element::aov_set("outUV").with_child(Element::aov("outUV", "vector2")));

    surface_network(&mut doc);

    doc.insert(Element::material("lambert1SG").with_child(Element::shader_ref("lambert1")));

    let assign = Element::material_assign("lambert1SG")
        .with("collection", "xyzCol")
        .unwrap();
    doc.insert(Element::look("lookA").with_child(assign));

    doc
}

/// Compare attribute values and child keys at every level.
fn assert_same_tree(a: &Element, b: &Element, path: &str) {
    assert_eq!(a.tag(), b.tag(), "tag at {}", path);

    let values_a: Vec<_> = a.attributes().map(|attr| (attr.name(), attr.value())).collect();
    let values_b: Vec<_> = b.attributes().map(|attr| (attr.name(), attr.value())).collect();
    assert_eq!(values_a, values_b, "attributes at {}", path);

    let keys_a: Vec<_> = a.child_keys().collect();
    let keys_b: Vec<_> = b.child_keys().collect();
    assert_eq!(keys_a, keys_b, "children at {}", path);

    for (key, child) in a.children() {
        let other = b.child(key).unwrap();
        assert_same_tree(child, other, &format!("{}/{}", path, key));
    }
}

#[test]
fn test_scene_round_trip() {
    let doc = scene_document();

    let xml = doc.to_xml_string(&WriteOptions::default()).unwrap();
    let parsed = Document::parse_str(&xml).unwrap();
    assert_same_tree(doc.root(), parsed.root(), "materialx");

    let xml_again = parsed.to_xml_string(&WriteOptions::default()).unwrap();
    let reparsed = Document::parse_str(&xml_again).unwrap();
    assert_same_tree(parsed.root(), reparsed.root(), "materialx");

    assert_eq!(doc, reparsed);
    assert_eq!(xml, xml_again);
}

#[test]
fn test_scene_contents() {
    let doc = Document::parse_str(
        &scene_document()
            .to_xml_string(&WriteOptions::compact())
            .unwrap(),
    )
    .unwrap();

    let keys: Vec<_> = doc.children().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        [
            "xyzCol",
            "gi1",
            "outColor",
            "outColorTransparency",
            "outUV",
            "place2dTexture1",
            "noise1",
            "lambert1",
            "lambert1SG",
            "lookA"
        ]
    );

    let txtid = doc.get("gi1").unwrap().child("txtid").unwrap();
    assert_eq!(txtid.typed_value("value").unwrap(), Some(Value::Integer(1001)));

    let lambert = doc.get("lambert1").unwrap();
    assert_eq!(lambert.get_float("xpos"), Some(120.5));
    assert_eq!(
        lambert.child("incandescence").unwrap().get_str("shader"),
        Some("noise1")
    );
    assert_eq!(
        lambert.child("color").unwrap().typed_value("value").unwrap(),
        Some(Value::Color3(vec![0.5, 0.3, 0.1]))
    );

    let material = doc.get("lambert1SG").unwrap();
    assert_eq!(material.child_keys().collect::<Vec<_>>(), ["lambert1"]);

    let assign = doc.get("lookA").unwrap().child("lambert1SG").unwrap();
    assert_eq!(assign.tag(), "materialassign");
    assert_eq!(assign.get_str("collection"), Some("xyzCol"));
}

#[test]
fn test_parse_hand_written_document() {
    let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<materialx version="1.0" colorspace="lin_rec709">
  <collection name="xyzCol">
    <collectionadd name="xyzColAdd" geom="/pCube1" includechildren="true"/>
  </collection>
  <geominfo name="gi1" geom="/pCube1">
    <geomattr name="txtid" type="integer" value="1001"/>
  </geominfo>
  <shader name="noise1" shadertype="utility" shaderprogram="noise" xpos="1.5e2" ypos="-20">
    <parameter name="amplitude" type="float" value="0.50"/>
    <input name="unknown" type="float" value="1"/>
  </shader>
  <material name="noiseSG">
    <shaderref name="noise1"/>
  </material>
  <look name="lookA">
    <materialassign name="noiseSG" collection="xyzCol"/>
  </look>
</materialx>"#;

    let doc = Document::parse_str(xml).unwrap();

    let add = doc.get("xyzCol").unwrap().child("xyzColAdd").unwrap();
    assert_eq!(add.get_bool("includechildren"), Some(true));

    let noise = doc.get("noise1").unwrap();
    assert_eq!(noise.get_float("xpos"), Some(150.0));
    assert_eq!(noise.get_float("ypos"), Some(-20.0));
    assert_eq!(noise.child_keys().collect::<Vec<_>>(), ["amplitude"]);

    let out = doc.to_xml_string(&WriteOptions::compact()).unwrap();
    assert!(out.contains(r#"xpos="150""#));
    assert!(out.contains(r#"includechildren="true""#));
    assert!(!out.contains("colorspace"));
    assert!(!out.contains("<input"));

    assert_eq!(Document::parse_str(&out).unwrap(), doc);
}

#[test]
fn test_serialize_requires_required_attributes() {
    let mut doc = Document::new();
    let mut shader = Element::shader("s", "surface", "lambert");
    shader.attribute_mut("shadertype").unwrap().clear();
    doc.insert(shader);

    let err = doc.to_xml_string(&WriteOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        mtlx::model::Error::MissingRequiredAttribute { ref attribute, .. } if attribute == "shadertype"
    ));
}

#[test]
fn test_parallel_parses_share_registry() {
    let xml = scene_document()
        .to_xml_string(&WriteOptions::default())
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let xml = xml.clone();
            std::thread::spawn(move || Document::parse_str(&xml).unwrap())
        })
        .collect();

    let docs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(docs.windows(2).all(|w| w[0] == w[1]));
}
