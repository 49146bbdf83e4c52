use glam::IVec3;

use crate::error::ChunkError;

/// The six directions a cube face can point, in mesh emission order.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    NegZ = 0,
    PosX = 1,
    PosZ = 2,
    NegX = 3,
    PosY = 4,
    NegY = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::NegZ,
        Face::PosX,
        Face::PosZ,
        Face::NegX,
        Face::PosY,
        Face::NegY,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit offset to the neighbor this face looks at
    pub fn offset(self) -> IVec3 {
        match self {
            Face::NegZ => IVec3::NEG_Z,
            Face::PosX => IVec3::X,
            Face::PosZ => IVec3::Z,
            Face::NegX => IVec3::NEG_X,
            Face::PosY => IVec3::Y,
            Face::NegY => IVec3::NEG_Y,
        }
    }
}

impl TryFrom<usize> for Face {
    type Error = ChunkError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Face::ALL
            .get(index)
            .copied()
            .ok_or(ChunkError::InvalidFaceIndex(index))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Voxel {
    pub local_pos: IVec3,
    /// Air cell. Empty voxels never carry visible faces.
    pub empty: bool,
    /// Indexed by [`Face::index`]
    pub face_visible: [bool; 6],
}

impl Voxel {
    pub fn new(local_pos: IVec3) -> Voxel {
        Self {
            local_pos,
            empty: true,
            face_visible: [false; 6],
        }
    }

    pub fn is_face_visible(&self, face: Face) -> bool {
        self.face_visible[face.index()]
    }

    pub fn face(&self, index: usize) -> Result<bool, ChunkError> {
        Face::try_from(index).map(|face| self.is_face_visible(face))
    }

    pub fn visible_face_count(&self) -> usize {
        if self.empty {
            return 0;
        }
        self.face_visible.iter().filter(|visible| **visible).count()
    }
}
