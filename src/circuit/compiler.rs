use std::collections::{HashMap, HashSet};

use crate::disjoint_set::DisjointSet;

use super::GraphError;

/// Identifies a virtual (collapsible) resistor added to a [`LineCompiler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualId(usize);

/// Identifies a real component owned by the host circuit. Opaque to the
/// compiler: it never looks inside, only compares and forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RealId(pub u64);

/// Identifies one emitted composite `Line` component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(usize);

/// Which of a two-terminal component's pins is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pin {
    Positive,
    Negative,
}

impl Pin {
    fn local(self) -> usize {
        match self {
            Pin::Positive => 0,
            Pin::Negative => 1,
        }
    }
}

/// Where a virtual resistor landed after compilation: which `Line` and at
/// which position in its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePart {
    pub line: LineId,
    pub index: usize,
}

/// A composite resistor standing in for one collapsed chain of virtual
/// resistors, in chain order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: LineId,
    pub parts: Vec<VirtualId>,
}

/// One endpoint of a connection the host circuit should make: either one of
/// its own real components, or a pin of a compiled `Line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Real(RealId, usize),
    Line(LineId, usize),
}

/// One endpoint passed to [`LineCompiler::connect`]: tags whether the pin
/// belongs to a virtual resistor tracked by the compiler or to an opaque
/// real component, so a single method can dispatch instead of one overload
/// per polarity combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Virtual(VirtualId, Pin),
    Real(RealId, usize),
}

/// The compiled output: every virtual resistor's landing spot plus the
/// real-to-real (and line-to-line) connections to issue against the host
/// circuit.
#[derive(Debug, Clone)]
pub struct CompiledGraph {
    pub lines: Vec<Line>,
    pub parts: HashMap<VirtualId, LinePart>,
    pub real_connections: Vec<(Terminal, Terminal)>,
}

/// Builds up a graph of virtual resistors and real-component attachments,
/// then collapses maximal series chains into `Line` components in one
/// `build()` pass.
///
/// Each virtual resistor owns two pins, each a node in a disjoint-set
/// forest. A pin is a break-point if real connectivity reaches it or if its
/// union-find class isn't exactly size 2 (i.e. anything but a plain link to
/// one other virtual pin). A virtual resistor with at least one break-point
/// pin is an "outer"; everything else is an "inner" eligible to be absorbed
/// into a chain.
pub struct LineCompiler {
    resistances: Vec<f64>,
    pins: DisjointSet,
    has_reals: Vec<bool>,
    v2r: HashMap<usize, Vec<(RealId, usize, usize)>>,
    v2v: HashMap<usize, Vec<(usize, usize, usize)>>,
    known_reals: HashSet<RealId>,
    built: bool,
}

impl Default for LineCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCompiler {
    pub fn new() -> Self {
        Self {
            resistances: Vec::new(),
            pins: DisjointSet::new(0),
            has_reals: Vec::new(),
            v2r: HashMap::new(),
            v2v: HashMap::new(),
            known_reals: HashSet::new(),
            built: false,
        }
    }

    fn pin_index(virt: usize, local: usize) -> usize {
        virt * 2 + local
    }

    /// The live resistance of a tracked virtual resistor. `Line.Part`s
    /// reference virtual resistors by [`VirtualId`] rather than snapshotting
    /// a value, so a change made through [`Self::set_resistance`] is visible
    /// to anything that looks the resistor up again, before or after
    /// `build()`.
    pub fn resistance_of(&self, id: VirtualId) -> f64 {
        self.resistances[id.0]
    }

    /// Updates a tracked virtual resistor's resistance. Resistance is live
    /// state, not part of the frozen topology, so this is allowed even after
    /// `build()`.
    pub fn set_resistance(&mut self, id: VirtualId, resistance: f64) {
        self.resistances[id.0] = resistance;
    }

    pub fn add_virtual(&mut self, resistance: f64) -> Result<VirtualId, GraphError> {
        if self.built {
            return Err(GraphError::AlreadyBuilt);
        }
        let idx = self.resistances.len();
        self.resistances.push(resistance);
        self.pins.push();
        self.pins.push();
        self.has_reals.push(false);
        self.has_reals.push(false);
        Ok(VirtualId(idx))
    }

    /// Registers a real component identity so later `connect` calls can
    /// validate against it. Duplicate registration is a no-op that reports
    /// `false` rather than mutating or failing.
    pub fn add_real(&mut self, id: RealId) -> Result<bool, GraphError> {
        if self.built {
            return Err(GraphError::AlreadyBuilt);
        }
        Ok(self.known_reals.insert(id))
    }

    /// Connects two pins, each either a tracked virtual resistor or an
    /// opaque real component. Dispatches internally instead of exposing one
    /// method per polarity combination.
    pub fn connect(&mut self, a: Endpoint, b: Endpoint) -> Result<(), GraphError> {
        match (a, b) {
            (Endpoint::Virtual(va, pa), Endpoint::Virtual(vb, pb)) => self.connect_virtual_virtual(va, pa, vb, pb),
            (Endpoint::Virtual(v, p), Endpoint::Real(r, rp)) | (Endpoint::Real(r, rp), Endpoint::Virtual(v, p)) => {
                self.connect_virtual_real(v, p, r, rp)
            }
            (Endpoint::Real(_, _), Endpoint::Real(_, _)) => Err(GraphError::RealRealConnection),
        }
    }

    fn connect_virtual_virtual(&mut self, a: VirtualId, a_pin: Pin, b: VirtualId, b_pin: Pin) -> Result<(), GraphError> {
        if self.built {
            return Err(GraphError::AlreadyBuilt);
        }
        if a == b {
            return Err(GraphError::SelfConnection);
        }
        let pa = Self::pin_index(a.0, a_pin.local());
        let pb = Self::pin_index(b.0, b_pin.local());
        self.unite_pins(pa, pb);
        self.v2v.entry(a.0).or_default().push((b.0, b_pin.local(), a_pin.local()));
        self.v2v.entry(b.0).or_default().push((a.0, a_pin.local(), b_pin.local()));
        Ok(())
    }

    fn connect_virtual_real(&mut self, v: VirtualId, v_pin: Pin, real: RealId, real_pin: usize) -> Result<(), GraphError> {
        if self.built {
            return Err(GraphError::AlreadyBuilt);
        }
        if !self.known_reals.contains(&real) {
            return Err(GraphError::UnknownComponent);
        }
        let p = Self::pin_index(v.0, v_pin.local());
        let root = self.pins.find(p);
        self.has_reals[root] = true;
        self.v2r.entry(v.0).or_default().push((real, real_pin, v_pin.local()));
        Ok(())
    }

    fn unite_pins(&mut self, a: usize, b: usize) {
        let ra = self.pins.find(a);
        let rb = self.pins.find(b);
        let merged = self.has_reals[ra] || self.has_reals[rb];
        let winner = self.pins.unite(a, b);
        self.has_reals[winner] = merged;
    }

    fn is_break_point(&mut self, virt: usize, local: usize) -> bool {
        let p = Self::pin_index(virt, local);
        let root = self.pins.find(p);
        self.has_reals[root] || self.pins.size_of(root) != 2
    }

    fn is_outer(&mut self, virt: usize) -> bool {
        self.is_break_point(virt, 0) || self.is_break_point(virt, 1)
    }

    fn edge_at(&self, virt: usize, local: usize) -> Option<(usize, usize)> {
        self.v2v.get(&virt)?.iter().find(|e| e.2 == local).map(|e| (e.0, e.1))
    }

    /// The pin on `start` that is *not* a break-point, and what it connects
    /// to, as `(start_local, other_virtual, other_local)`. `None` if `start`
    /// has no such pin (both break-points: a one-virtual chain).
    fn anchor_of(&mut self, start: usize) -> Option<(usize, usize, usize)> {
        let bp0 = self.is_break_point(start, 0);
        let bp1 = self.is_break_point(start, 1);
        match (bp0, bp1) {
            (true, true) => None,
            (false, true) => self.edge_at(start, 0).map(|(v, l)| (0, v, l)),
            (true, false) => self.edge_at(start, 1).map(|(v, l)| (1, v, l)),
            (false, false) => None,
        }
    }

    /// Collapses every maximal chain into a `Line` and reports the real
    /// connections the host circuit should issue. Refuses further mutation
    /// afterward (subsequent `add_*`/`connect_*` calls fail with
    /// [`GraphError::AlreadyBuilt`]).
    pub fn build(&mut self) -> Result<CompiledGraph, GraphError> {
        if self.built {
            return Err(GraphError::AlreadyBuilt);
        }
        self.built = true;

        let n = self.resistances.len();
        let mut visited = vec![false; n];
        let mut lines: Vec<Line> = Vec::new();
        let mut parts: HashMap<VirtualId, LinePart> = HashMap::new();
        let mut internal: HashSet<(usize, usize, usize, usize)> = HashSet::new();

        for start in 0..n {
            if visited[start] || !self.is_outer(start) {
                continue;
            }
            visited[start] = true;
            let mut chain = vec![start];

            if let Some((start_local, mut cur, mut entry_local)) = self.anchor_of(start) {
                internal.insert((start, start_local, cur, entry_local));
                internal.insert((cur, entry_local, start, start_local));

                loop {
                    if self.is_outer(cur) {
                        visited[cur] = true;
                        chain.push(cur);
                        break;
                    }
                    if self.v2r.get(&cur).is_some_and(|v| !v.is_empty()) {
                        return Err(GraphError::InnerPrecondition);
                    }
                    let other_local = 1 - entry_local;
                    let Some((next, next_local)) = self.edge_at(cur, other_local) else {
                        return Err(GraphError::InnerPrecondition);
                    };
                    internal.insert((cur, other_local, next, next_local));
                    internal.insert((next, next_local, cur, other_local));
                    chain.push(cur);
                    cur = next;
                    entry_local = next_local;
                }
            }

            let line_id = LineId(lines.len());
            for (i, &v) in chain.iter().enumerate() {
                parts.insert(VirtualId(v), LinePart { line: line_id, index: i });
            }
            lines.push(Line { id: line_id, parts: chain.iter().map(|&v| VirtualId(v)).collect() });
        }

        let assign_line_pin = |parts: &HashMap<VirtualId, LinePart>, lines: &[Line], virt: usize, local: usize| -> usize {
            let lp = parts[&VirtualId(virt)];
            let chain_len = lines[lp.line.0].parts.len();
            if chain_len == 1 {
                local
            } else if lp.index == 0 {
                0
            } else {
                1
            }
        };

        // Every break-point pin is one electrical node, whether reached by a
        // real attachment or a virtual-to-virtual wire to another break-point
        // pin. A pin can appear in more than one raw edge (a fan-in hub), so
        // terminals are collected per disjoint-set root rather than per edge,
        // then wired as a star anchored at the first terminal seen — that
        // reproduces the same equivalence class with one pass of pairwise
        // connections instead of one pair per raw edge.
        let mut root_terminals: HashMap<usize, Vec<Terminal>> = HashMap::new();
        let mut root_order: Vec<usize> = Vec::new();
        let mut pin_terminal_added: HashSet<(usize, usize)> = HashSet::new();

        let push_root_terminal = |root_terminals: &mut HashMap<usize, Vec<Terminal>>, root_order: &mut Vec<usize>, root: usize, terminal: Terminal| {
            let group = root_terminals.entry(root).or_insert_with(|| {
                root_order.push(root);
                Vec::new()
            });
            group.push(terminal);
        };

        let mut v2r_keys: Vec<&usize> = self.v2r.keys().collect();
        v2r_keys.sort_unstable();
        for &&virt in &v2r_keys {
            for &(real_id, real_pin, local) in &self.v2r[&virt] {
                let root = self.pins.find(Self::pin_index(virt, local));
                push_root_terminal(&mut root_terminals, &mut root_order, root, Terminal::Real(real_id, real_pin));
                if pin_terminal_added.insert((virt, local)) {
                    let line_id = parts[&VirtualId(virt)].line;
                    let pin = assign_line_pin(&parts, &lines, virt, local);
                    push_root_terminal(&mut root_terminals, &mut root_order, root, Terminal::Line(line_id, pin));
                }
            }
        }

        let mut v2v_keys: Vec<&usize> = self.v2v.keys().collect();
        v2v_keys.sort_unstable();
        for &&virt in &v2v_keys {
            for &(other, other_local, local) in &self.v2v[&virt] {
                if internal.contains(&(virt, local, other, other_local)) {
                    continue;
                }
                if pin_terminal_added.insert((virt, local)) {
                    let root = self.pins.find(Self::pin_index(virt, local));
                    let line_id = parts[&VirtualId(virt)].line;
                    let pin = assign_line_pin(&parts, &lines, virt, local);
                    push_root_terminal(&mut root_terminals, &mut root_order, root, Terminal::Line(line_id, pin));
                }
            }
        }

        let mut real_connections = Vec::new();
        for root in root_order {
            let group = &root_terminals[&root];
            for terminal in &group[1..] {
                real_connections.push((group[0], *terminal));
            }
        }

        Ok(CompiledGraph { lines, parts, real_connections })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_resistor_series_chain_collapses_to_one_line() {
        let mut c = LineCompiler::new();
        let r: Vec<VirtualId> = (0..5).map(|_| c.add_virtual(100.0).unwrap()).collect();
        for i in 0..4 {
            c.connect(Endpoint::Virtual(r[i], Pin::Negative), Endpoint::Virtual(r[i + 1], Pin::Positive)).unwrap();
        }
        let real_a = RealId(1);
        let real_b = RealId(2);
        c.add_real(real_a).unwrap();
        c.add_real(real_b).unwrap();
        c.connect(Endpoint::Virtual(r[0], Pin::Positive), Endpoint::Real(real_a, 0)).unwrap();
        c.connect(Endpoint::Real(real_b, 0), Endpoint::Virtual(r[4], Pin::Negative)).unwrap();

        let compiled = c.build().unwrap();
        assert_eq!(compiled.lines.len(), 1);
        assert_eq!(compiled.lines[0].parts.len(), 5);
        for v in &r {
            assert!(compiled.parts.contains_key(v));
        }
        assert_eq!(compiled.real_connections.len(), 2);
    }

    #[test]
    fn isolated_virtual_resistor_with_no_connections_is_its_own_line() {
        let mut c = LineCompiler::new();
        let v = c.add_virtual(50.0).unwrap();
        let compiled = c.build().unwrap();
        assert_eq!(compiled.lines.len(), 1);
        assert_eq!(compiled.lines[0].parts, vec![v]);
    }

    #[test]
    fn fan_out_virtual_resistor_is_its_own_outer_not_collapsed() {
        let mut c = LineCompiler::new();
        let a = c.add_virtual(10.0).unwrap();
        let b = c.add_virtual(10.0).unwrap();
        let hub = c.add_virtual(10.0).unwrap();
        c.connect(Endpoint::Virtual(a, Pin::Negative), Endpoint::Virtual(hub, Pin::Positive)).unwrap();
        c.connect(Endpoint::Virtual(b, Pin::Negative), Endpoint::Virtual(hub, Pin::Positive)).unwrap();
        let compiled = c.build().unwrap();
        // hub's positive pin has size 3 (fan-in), so it is a break-point: a, b, and
        // hub each stand alone (a and b have a free floating other pin too).
        assert!(compiled.lines.len() >= 2);
    }

    #[test]
    fn self_connection_is_rejected() {
        let mut c = LineCompiler::new();
        let a = c.add_virtual(10.0).unwrap();
        assert_eq!(
            c.connect(Endpoint::Virtual(a, Pin::Positive), Endpoint::Virtual(a, Pin::Negative)),
            Err(GraphError::SelfConnection)
        );
    }

    #[test]
    fn connecting_unknown_real_fails() {
        let mut c = LineCompiler::new();
        let a = c.add_virtual(10.0).unwrap();
        assert_eq!(
            c.connect(Endpoint::Virtual(a, Pin::Positive), Endpoint::Real(RealId(99), 0)),
            Err(GraphError::UnknownComponent)
        );
    }

    #[test]
    fn real_to_real_connect_is_rejected() {
        let mut c = LineCompiler::new();
        let real_a = RealId(1);
        let real_b = RealId(2);
        c.add_real(real_a).unwrap();
        c.add_real(real_b).unwrap();
        assert_eq!(
            c.connect(Endpoint::Real(real_a, 0), Endpoint::Real(real_b, 0)),
            Err(GraphError::RealRealConnection)
        );
    }

    #[test]
    fn mutation_after_build_fails() {
        let mut c = LineCompiler::new();
        c.add_virtual(10.0).unwrap();
        c.build().unwrap();
        assert_eq!(c.add_virtual(10.0), Err(GraphError::AlreadyBuilt));
        assert_eq!(c.build(), Err(GraphError::AlreadyBuilt));
    }

    #[test]
    fn resistance_mutation_after_build_is_visible_through_the_live_accessor() {
        let mut c = LineCompiler::new();
        let a = c.add_virtual(100.0).unwrap();
        let b = c.add_virtual(100.0).unwrap();
        c.connect(Endpoint::Virtual(a, Pin::Negative), Endpoint::Virtual(b, Pin::Positive)).unwrap();
        c.build().unwrap();
        assert_eq!(c.resistance_of(a), 100.0);
        c.set_resistance(a, 220.0);
        assert_eq!(c.resistance_of(a), 220.0);
    }

    #[test]
    fn duplicate_real_registration_reports_false_without_mutating() {
        let mut c = LineCompiler::new();
        let id = RealId(7);
        assert!(c.add_real(id).unwrap());
        assert!(!c.add_real(id).unwrap());
    }
}
