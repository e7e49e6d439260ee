//! Conversions between runtime types and persist schema types.
//!
//! Runtime → schema is infallible (`From`). Schema → runtime validates and
//! is `TryFrom`.

use super::schema::{
    FeatureSchemaSchema, ForestSchema, GBDTModelSchema, InputColumnSchema, OutputTransformSchema, PipelineArtifact,
    TreeSchema,
};
use super::{PersistError, FORMAT_TAG, FORMAT_VERSION};
use crate::model::GBDTModel;
use crate::pipeline::Pipeline;
use crate::preprocess::{ColumnTransform, FeatureSchema, InputColumn, InputKind, OneHotEncoder};
use crate::repr::gbdt::{Forest, ForestValidationError, Tree, TreeValidationError};
use crate::training::{LogisticLoss, ObjectiveFn};

// =============================================================================
// Tree / Forest
// =============================================================================

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        Self {
            num_nodes: tree.n_nodes() as u32,
            split_indices: tree.split_indices().to_vec(),
            thresholds: tree.thresholds().iter().map(|&t| t as f64).collect(),
            children_left: tree.left_children().to_vec(),
            children_right: tree.right_children().to_vec(),
            default_left: tree.default_lefts().to_vec(),
            is_leaf: tree.leaf_flags().to_vec(),
            leaf_values: tree.leaf_values().iter().map(|&v| v as f64).collect(),
        }
    }
}

impl TryFrom<TreeSchema> for Tree {
    type Error = TreeValidationError;

    fn try_from(schema: TreeSchema) -> Result<Self, Self::Error> {
        let n_nodes = schema.num_nodes as usize;
        if schema.is_leaf.len() != n_nodes {
            return Err(TreeValidationError::LengthMismatch {
                field: "is_leaf",
                len: schema.is_leaf.len(),
                n_nodes,
            });
        }
        Tree::from_parts(
            schema.split_indices,
            schema.thresholds.into_iter().map(|t| t as f32).collect(),
            schema.children_left,
            schema.children_right,
            schema.default_left,
            schema.is_leaf,
            schema.leaf_values.into_iter().map(|v| v as f32).collect(),
        )
    }
}

impl From<&Forest> for ForestSchema {
    fn from(forest: &Forest) -> Self {
        Self {
            base_score: forest.base_score() as f64,
            trees: forest.trees().map(TreeSchema::from).collect(),
        }
    }
}

impl TryFrom<ForestSchema> for Forest {
    type Error = ForestValidationError;

    fn try_from(schema: ForestSchema) -> Result<Self, Self::Error> {
        let mut forest = Forest::new(schema.base_score as f32);
        for (tree_idx, tree) in schema.trees.into_iter().enumerate() {
            let tree = Tree::try_from(tree).map_err(|error| ForestValidationError::InvalidTree { tree_idx, error })?;
            forest.push_tree(tree);
        }
        forest.validate()?;
        Ok(forest)
    }
}

// =============================================================================
// Model
// =============================================================================

impl From<&GBDTModel> for GBDTModelSchema {
    fn from(model: &GBDTModel) -> Self {
        Self {
            num_features: model.n_features(),
            output_transform: OutputTransformSchema::Sigmoid,
            forest: ForestSchema::from(model.forest()),
            objective_name: Some(LogisticLoss.name().to_string()),
        }
    }
}

impl TryFrom<GBDTModelSchema> for GBDTModel {
    type Error = PersistError;

    fn try_from(schema: GBDTModelSchema) -> Result<Self, Self::Error> {
        let forest = Forest::try_from(schema.forest).map_err(|e| PersistError::InvalidModel(format!("{e:?}")))?;
        forest
            .validate_features(schema.num_features)
            .map_err(|e| PersistError::InvalidModel(format!("{e:?}")))?;
        Ok(GBDTModel::from_forest(forest, schema.num_features))
    }
}

// =============================================================================
// Feature schema
// =============================================================================

impl From<&FeatureSchema> for FeatureSchemaSchema {
    fn from(schema: &FeatureSchema) -> Self {
        let columns = schema
            .columns()
            .iter()
            .map(|c| {
                let name = c.name.clone();
                match &c.kind {
                    InputKind::Categorical(enc) => InputColumnSchema::Categorical {
                        name,
                        vocabulary: enc.vocabulary().to_vec(),
                    },
                    InputKind::Numeric => InputColumnSchema::Numeric { name },
                    InputKind::Dropped => InputColumnSchema::Dropped { name },
                }
            })
            .collect();
        Self {
            version: schema.version(),
            columns,
        }
    }
}

impl TryFrom<FeatureSchemaSchema> for FeatureSchema {
    type Error = PersistError;

    fn try_from(schema: FeatureSchemaSchema) -> Result<Self, Self::Error> {
        let columns = schema
            .columns
            .into_iter()
            .map(|c| match c {
                InputColumnSchema::Categorical { name, vocabulary } => {
                    let enc = OneHotEncoder::from_vocabulary(vocabulary).ok_or_else(|| {
                        PersistError::InvalidSchema(format!("vocabulary of {name} is not strictly sorted"))
                    })?;
                    Ok(InputColumn {
                        name,
                        kind: InputKind::Categorical(enc),
                    })
                }
                InputColumnSchema::Numeric { name } => Ok(InputColumn {
                    name,
                    kind: InputKind::Numeric,
                }),
                InputColumnSchema::Dropped { name } => Ok(InputColumn {
                    name,
                    kind: InputKind::Dropped,
                }),
            })
            .collect::<Result<Vec<_>, PersistError>>()?;
        Ok(FeatureSchema::with_version(schema.version, columns)?)
    }
}

// =============================================================================
// Pipeline
// =============================================================================

impl From<&Pipeline> for PipelineArtifact {
    fn from(pipeline: &Pipeline) -> Self {
        Self {
            format: FORMAT_TAG.to_string(),
            format_version: FORMAT_VERSION,
            schema: FeatureSchemaSchema::from(pipeline.transform().schema()),
            model: GBDTModelSchema::from(pipeline.model()),
        }
    }
}

impl TryFrom<PipelineArtifact> for Pipeline {
    type Error = PersistError;

    fn try_from(artifact: PipelineArtifact) -> Result<Self, Self::Error> {
        super::check_header(&artifact.format, artifact.format_version)?;
        let schema = FeatureSchema::try_from(artifact.schema)?;
        let model = GBDTModel::try_from(artifact.model)?;
        let transform = ColumnTransform::from_schema(schema);
        if transform.width() != model.n_features() {
            return Err(PersistError::WidthMismatch {
                schema: transform.width(),
                model: model.n_features(),
            });
        }
        Pipeline::new(transform, model).map_err(|e| PersistError::InvalidModel(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::gbdt::MutableTree;

    fn stump() -> Tree {
        let mut t = MutableTree::with_capacity(3);
        let root = t.init_root();
        let (l, r) = t.split(root, 1, 0.5, true);
        t.make_leaf(l, -0.25);
        t.make_leaf(r, 0.75);
        t.freeze()
    }

    #[test]
    fn tree_survives_conversion() {
        let tree = stump();
        let back = Tree::try_from(TreeSchema::from(&tree)).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn tree_with_bad_child_is_rejected() {
        let mut schema = TreeSchema::from(&stump());
        schema.children_left[0] = 7;
        assert!(matches!(
            Tree::try_from(schema),
            Err(TreeValidationError::ChildOutOfRange { child: 7, .. })
        ));
    }

    #[test]
    fn model_feature_indices_are_checked() {
        let mut forest = Forest::new(0.0);
        forest.push_tree(stump());
        let mut schema = GBDTModelSchema::from(&GBDTModel::from_forest(forest, 2));
        assert!(GBDTModel::try_from(schema.clone()).is_ok());
        schema.num_features = 1;
        assert!(matches!(GBDTModel::try_from(schema), Err(PersistError::InvalidModel(_))));
    }

    #[test]
    fn unsorted_vocabulary_is_rejected() {
        let schema = FeatureSchemaSchema {
            version: 1,
            columns: vec![InputColumnSchema::Categorical {
                name: "country".into(),
                vocabulary: vec!["Iraq".into(), "Egypt".into()],
            }],
        };
        assert!(matches!(FeatureSchema::try_from(schema), Err(PersistError::InvalidSchema(_))));
    }
}
