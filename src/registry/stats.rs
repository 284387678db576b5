#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub endpoints_seen: usize,
    pub endpoints_mapped: usize,
    pub rules_registered: usize,
}

impl RegistryStats {
    pub fn record_endpoint(&mut self) {
        self.endpoints_seen += 1;
    }

    pub fn record_mapped(&mut self, rules: usize) {
        self.endpoints_mapped += 1;
        self.rules_registered += rules;
    }
}
