//! Renders a small office network to `netdiagram/office.png`.
//!
//! Needs the Graphviz `dot` program on `PATH`.

use netdiagram::{
    Diagram, DiagramError,
    catalog::generic::{compute, database, device, network, storage},
    options::{diagram, edge, group, node},
};

fn main() -> Result<(), DiagramError> {
    let mut diagram = Diagram::new([
        diagram::label("Office network"),
        diagram::file_name("office"),
        diagram::format("png"),
    ]);

    let vpn = network::vpn([node::id("vpn"), node::label("Site VPN")]);
    let fw = network::firewall([node::id("fw")]);
    let core = network::router([node::id("core"), node::label("Core\nRouter")]);
    diagram
        .connect(&vpn, &fw, [edge::bidirectional(), edge::label("IPsec")])
        .connect(&fw, &core, [edge::forward()]);

    let servers = diagram.new_group("servers", [group::label("Server room")]);
    servers.add([
        network::switch([node::id("srv_sw")]),
        compute::rack([node::id("rack")]),
        database::sql([node::id("db")]),
        storage::storage([node::id("nas"), node::label("NAS")]),
    ]);
    servers
        .connect_by_id("srv_sw", "rack", [])
        .connect_by_id("rack", "db", [edge::style("dashed")])
        .connect_by_id("rack", "nas", [edge::color("#1E88E5")]);

    let wifi = diagram.new_group("wifi", [group::label("Guest Wi-Fi")]);
    let subnet = wifi.new_group("guests", [group::label("10.20.0.0/24")]);
    subnet.add([
        network::subnet([node::id("guest_net"), node::label("Guest subnet")]),
        device::mobile([node::id("phone")]),
        device::tablet([node::id("tablet")]),
    ]);

    diagram
        .connect_by_id("core", "srv_sw", [edge::label("10Gbps")])
        .connect_by_id("core", "guest_net", [edge::attribute("constraint", "false")])
        .connect_by_id("guest_net", "phone", [edge::style("dotted")])
        .connect_by_id("guest_net", "tablet", [edge::style("dotted")]);

    diagram.render()
}
